// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Return data decoding.

use alloc::string::String;
use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};

use crate::config::{ADDRESS_LEN, WORD_LEN};
use crate::error::{KernelError, Result};
use crate::proof::AnchorRecord;
use crate::types::address::Address;
use crate::types::hash::ContentHash;

fn word_at(data: &[u8], index: usize) -> Result<&[u8]> {
    let start = index * WORD_LEN;
    data.get(start..start + WORD_LEN).ok_or(KernelError::InvalidReturnData)
}

/// All-zero word is `false`, any set bit is `true`.
pub fn decode_bool(data: &[u8]) -> Result<bool> {
    let word = word_at(data, 0)?;
    Ok(word.iter().any(|b| *b != 0))
}

/// Big-endian word. Values above `u128::MAX` are `Overflow`.
pub fn decode_uint256(data: &[u8]) -> Result<u128> {
    word_to_u128(word_at(data, 0)?)
}

pub fn decode_u64(data: &[u8]) -> Result<u64> {
    u64::try_from(decode_uint256(data)?).map_err(|_| KernelError::Overflow)
}

fn word_to_u128(word: &[u8]) -> Result<u128> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(KernelError::Overflow);
    }
    Ok(BigEndian::read_u128(&word[16..]))
}

fn word_to_usize(word: &[u8]) -> Result<usize> {
    usize::try_from(word_to_u128(word)?).map_err(|_| KernelError::InvalidReturnData)
}

fn word_to_address(word: &[u8]) -> Result<Address> {
    let pad = WORD_LEN - ADDRESS_LEN;
    if word[..pad].iter().any(|b| *b != 0) {
        return Err(KernelError::InvalidReturnData);
    }
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&word[pad..]);
    Ok(Address(out))
}

fn decode_string_at(data: &[u8], offset: usize) -> Result<String> {
    if offset % WORD_LEN != 0 {
        return Err(KernelError::InvalidReturnData);
    }
    let len = word_to_usize(word_at(data, offset / WORD_LEN)?)?;
    let start = offset + WORD_LEN;
    let end = start.checked_add(len).ok_or(KernelError::InvalidReturnData)?;
    let bytes = data.get(start..end).ok_or(KernelError::InvalidReturnData)?;

    String::from_utf8(Vec::from(bytes)).map_err(|_| KernelError::InvalidReturnData)
}

/// Decodes the `(bytes32,bytes32,string,address,uint256)` tuple returned by
/// `getVersion` and `getLatestVersion`.
pub fn decode_anchor_record(data: &[u8]) -> Result<AnchorRecord> {
    let content_hash = ContentHash::from_slice(word_at(data, 0)?)?;
    let previous_hash = ContentHash::from_slice(word_at(data, 1)?)?;
    let cid_offset = word_to_usize(word_at(data, 2)?)?;
    let editor = word_to_address(word_at(data, 3)?)?;
    let timestamp = u64::try_from(word_to_u128(word_at(data, 4)?)?)
        .map_err(|_| KernelError::Overflow)?;
    let ipfs_cid = decode_string_at(data, cid_offset)?;

    Ok(AnchorRecord {
        content_hash,
        previous_hash,
        ipfs_cid,
        editor,
        timestamp,
    })
}
