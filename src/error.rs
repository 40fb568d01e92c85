// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use alloc::string::String;
use core::fmt;

use crate::chain::ChainViolation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Signature is not part of the fixed contract interface.
    UnknownFunction(String),
    /// ABI type tag other than `bytes32`, `uint256` or `string`.
    UnsupportedType(String),
    /// Argument count differs from the declared parameter list.
    ArityMismatch { expected: usize, found: usize },
    /// Argument at `index` does not match the declared parameter type.
    TypeMismatch { index: usize, expected: &'static str },
    /// Malformed hex text.
    InvalidHex,
    /// Byte string of the wrong size.
    InvalidLength { expected: usize, found: usize },
    /// Decision identifier is not a UUID.
    InvalidDecisionId,
    /// Value does not fit the target integer width.
    Overflow,
    /// Return data is too short or structurally invalid.
    InvalidReturnData,
    /// A version chain failed validation.
    ChainIntegrity(ChainViolation),
    /// Version already carries a transaction hash.
    AlreadyAnchored,
    /// Item not found.
    NotFound,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::UnknownFunction(sig) => write!(f, "unknown function: {}", sig),
            KernelError::UnsupportedType(tag) => write!(f, "unsupported ABI type: {}", tag),
            KernelError::ArityMismatch { expected, found } => {
                write!(f, "expected {} arguments, found {}", expected, found)
            }
            KernelError::TypeMismatch { index, expected } => {
                write!(f, "argument {} must be {}", index, expected)
            }
            KernelError::InvalidHex => write!(f, "invalid hex string"),
            KernelError::InvalidLength { expected, found } => {
                write!(f, "expected {} bytes, found {}", expected, found)
            }
            KernelError::InvalidDecisionId => write!(f, "decision id is not a UUID"),
            KernelError::Overflow => write!(f, "integer overflow"),
            KernelError::InvalidReturnData => write!(f, "invalid return data"),
            KernelError::ChainIntegrity(v) => write!(f, "chain integrity violation: {}", v),
            KernelError::AlreadyAnchored => write!(f, "version is already anchored"),
            KernelError::NotFound => write!(f, "not found"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KernelError {}

impl From<hex::FromHexError> for KernelError {
    fn from(_: hex::FromHexError) -> Self {
        KernelError::InvalidHex
    }
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
