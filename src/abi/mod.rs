// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Minimal Contract ABI Codec
//!
//! Covers exactly the argument shapes the decision registry contract uses:
//! `bytes32`, `uint256` and `string`. Output is byte-identical to the standard
//! contract ABI for this subset.
//!
//! # Call data layout
//! ```text
//! selector (4 bytes)
//! ↓
//! head: one 32-byte word per argument, in order
//!   bytes32 → the value, left-padded
//!   uint256 → big-endian integer
//!   string  → byte offset of its tail block, relative to the head start
//! ↓
//! tail: for each string, in order
//!   length word, then UTF-8 bytes right-padded to a multiple of 32
//! ```

pub mod bytes32;
pub mod calls;
pub mod decode;
pub mod encode;
pub mod selector;

use alloc::string::String;
use core::fmt;

use crate::config::WORD_LEN;
use crate::error::{KernelError, Result};
use crate::types::hash::ContentHash;

pub use decode::{decode_anchor_record, decode_bool, decode_u64, decode_uint256};
pub use encode::{encode_args, encode_call, encode_call_data};
pub use selector::{selector_for, Function, Selector};

/// One ABI word.
pub type Word = [u8; WORD_LEN];

/// Supported parameter types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbiType {
    Bytes32,
    Uint256,
    String,
}

impl AbiType {
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "bytes32" => Ok(AbiType::Bytes32),
            "uint256" => Ok(AbiType::Uint256),
            "string" => Ok(AbiType::String),
            other => Err(KernelError::UnsupportedType(String::from(other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AbiType::Bytes32 => "bytes32",
            AbiType::Uint256 => "uint256",
            AbiType::String => "string",
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An argument value. `uint256` is carried as `u128`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    Bytes32(Word),
    Uint256(u128),
    String(String),
}

impl AbiValue {
    pub fn kind(&self) -> AbiType {
        match self {
            AbiValue::Bytes32(_) => AbiType::Bytes32,
            AbiValue::Uint256(_) => AbiType::Uint256,
            AbiValue::String(_) => AbiType::String,
        }
    }

    /// `bytes32` from up to 32 raw bytes, left-padded with zeros.
    pub fn bytes32_from_slice(bytes: &[u8]) -> Result<Self> {
        bytes32::left_pad(bytes).map(AbiValue::Bytes32)
    }

    /// `bytes32` from hex text of up to 64 digits, left-padded with zeros.
    pub fn bytes32_from_hex(text: &str) -> Result<Self> {
        bytes32::from_hex(text).map(AbiValue::Bytes32)
    }
}

impl From<ContentHash> for AbiValue {
    fn from(hash: ContentHash) -> Self {
        AbiValue::Bytes32(hash.0)
    }
}

impl From<u64> for AbiValue {
    fn from(n: u64) -> Self {
        AbiValue::Uint256(n as u128)
    }
}

impl From<u128> for AbiValue {
    fn from(n: u128) -> Self {
        AbiValue::Uint256(n)
    }
}

impl From<&str> for AbiValue {
    fn from(s: &str) -> Self {
        AbiValue::String(String::from(s))
    }
}

impl From<String> for AbiValue {
    fn from(s: String) -> Self {
        AbiValue::String(s)
    }
}
