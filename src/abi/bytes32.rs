// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-width `bytes32` conversions.

use crate::abi::Word;
use crate::config::WORD_LEN;
use crate::error::{KernelError, Result};
use crate::types::id::DecisionId;
use crate::types::{decode_hex, strip_hex_prefix};

/// Right-aligns up to 32 bytes in a zeroed word.
pub fn left_pad(bytes: &[u8]) -> Result<Word> {
    if bytes.len() > WORD_LEN {
        return Err(KernelError::InvalidLength { expected: WORD_LEN, found: bytes.len() });
    }
    let mut word = [0u8; WORD_LEN];
    word[WORD_LEN - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Hex text (up to 64 digits) as a left-padded word. Odd digit counts are
/// read as if a leading zero were present.
pub fn from_hex(text: &str) -> Result<Word> {
    let digits = strip_hex_prefix(text);
    if digits.len() % 2 == 1 {
        let mut even = alloc::string::String::with_capacity(digits.len() + 1);
        even.push('0');
        even.push_str(digits);
        return left_pad(&decode_hex(&even)?);
    }
    left_pad(&decode_hex(digits)?)
}

/// UUID decision id as its on-chain key.
///
/// Separators are dropped and the 16 UUID bytes are right-padded with zeros.
/// This is an embedding, not a hash.
pub fn decision_id_to_bytes32(uuid: &str) -> Result<Word> {
    DecisionId::parse(uuid).map(|id| id.to_bytes32())
}

/// UTF-8 text truncated to 32 bytes and right-padded with zeros.
pub fn string_to_bytes32(text: &str) -> Word {
    let bytes = text.as_bytes();
    let n = core::cmp::min(bytes.len(), WORD_LEN);
    let mut word = [0u8; WORD_LEN];
    word[..n].copy_from_slice(&bytes[..n]);
    word
}
