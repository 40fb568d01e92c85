// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Value types shared by the chain, the codec and the anchor client.

pub mod hash;
pub mod id;
pub mod address;

use alloc::vec::Vec;

use crate::error::{KernelError, Result};

/// Parses `0x`-prefixed (or bare) hex text into bytes.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(text);
    Ok(hex::decode(digits)?)
}

/// Parses hex text into exactly `N` bytes.
pub fn decode_hex_fixed<const N: usize>(text: &str) -> Result<[u8; N]> {
    let digits = strip_hex_prefix(text);
    if digits.len() != N * 2 {
        return Err(KernelError::InvalidLength { expected: N, found: digits.len() / 2 });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out)?;
    Ok(out)
}

/// Lowercase hex with a `0x` prefix.
pub fn encode_hex(bytes: &[u8]) -> alloc::string::String {
    let mut out = alloc::string::String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

pub(crate) fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}
