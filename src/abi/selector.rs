// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Function selectors for the decision registry contract.
//!
//! The function set is closed. Selectors are not stored: each one is the first
//! four bytes of Keccak-256 over the canonical signature, so a signature edit
//! can never leave a stale selector behind.

use alloc::string::String;
use alloc::vec::Vec;

use crate::abi::AbiType;
use crate::config::SELECTOR_LEN;
use crate::error::{KernelError, Result};
use crate::hash::keccak256;

pub type Selector = [u8; SELECTOR_LEN];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    RecordVersion,
    GetVersionCount,
    GetVersion,
    GetLatestVersion,
    VerifyHash,
    DecisionExists,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::RecordVersion,
        Function::GetVersionCount,
        Function::GetVersion,
        Function::GetLatestVersion,
        Function::VerifyHash,
        Function::DecisionExists,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::RecordVersion => "recordVersion",
            Function::GetVersionCount => "getVersionCount",
            Function::GetVersion => "getVersion",
            Function::GetLatestVersion => "getLatestVersion",
            Function::VerifyHash => "verifyHash",
            Function::DecisionExists => "decisionExists",
        }
    }

    /// Canonical signature: name and comma-separated types, no spaces.
    pub fn signature(&self) -> &'static str {
        match self {
            Function::RecordVersion => "recordVersion(bytes32,bytes32,bytes32,string)",
            Function::GetVersionCount => "getVersionCount(bytes32)",
            Function::GetVersion => "getVersion(bytes32,uint256)",
            Function::GetLatestVersion => "getLatestVersion(bytes32)",
            Function::VerifyHash => "verifyHash(bytes32,uint256,bytes32)",
            Function::DecisionExists => "decisionExists(bytes32)",
        }
    }

    pub fn params(&self) -> &'static [AbiType] {
        const B: AbiType = AbiType::Bytes32;
        const U: AbiType = AbiType::Uint256;
        const S: AbiType = AbiType::String;
        match self {
            Function::RecordVersion => &[B, B, B, S],
            Function::GetVersionCount => &[B],
            Function::GetVersion => &[B, U],
            Function::GetLatestVersion => &[B],
            Function::VerifyHash => &[B, U, B],
            Function::DecisionExists => &[B],
        }
    }

    pub fn is_view(&self) -> bool {
        !matches!(self, Function::RecordVersion)
    }

    pub fn selector(&self) -> Selector {
        let digest = keccak256(self.signature().as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    pub fn from_signature(signature: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.signature() == signature)
    }

    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Selector for a signature of the fixed interface.
pub fn selector_for(signature: &str) -> Result<Selector> {
    Function::from_signature(signature)
        .map(|f| f.selector())
        .ok_or_else(|| KernelError::UnknownFunction(String::from(signature)))
}

/// Parameter types declared by a signature string, e.g. `f(bytes32,string)`.
pub fn parse_params(signature: &str) -> Result<Vec<AbiType>> {
    let unknown = || KernelError::UnknownFunction(String::from(signature));

    let open = signature.find('(').ok_or_else(unknown)?;
    let inner = signature[open + 1..].strip_suffix(')').ok_or_else(unknown)?;
    if open == 0 {
        return Err(unknown());
    }

    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner.split(',').map(AbiType::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_params_match_signature() {
        for f in Function::ALL {
            assert_eq!(parse_params(f.signature()).unwrap(), f.params(), "{}", f.name());
            assert!(f.signature().starts_with(f.name()));
        }
    }

    #[test]
    fn test_parse_params_rejects_unknown_tag() {
        assert_eq!(
            parse_params("f(bytes32,address)"),
            Err(KernelError::UnsupportedType("address".into()))
        );
        assert!(matches!(parse_params("nope"), Err(KernelError::UnknownFunction(_))));
        assert_eq!(parse_params("f()").unwrap(), Vec::<AbiType>::new());
    }
}
