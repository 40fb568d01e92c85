// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Call data builders for each registry function.
//!
//! Argument shapes are fixed by the signatures, so these cannot fail.

use alloc::vec::Vec;

use crate::abi::encode::encode_call_data;
use crate::abi::selector::Function;
use crate::abi::AbiValue;
use crate::types::hash::ContentHash;
use crate::types::id::DecisionId;

pub fn record_version(
    decision: &DecisionId,
    content_hash: &ContentHash,
    previous_hash: &ContentHash,
    ipfs_cid: &str,
) -> Vec<u8> {
    encode_call_data(
        Function::RecordVersion.selector(),
        &[
            AbiValue::Bytes32(decision.to_bytes32()),
            AbiValue::from(*content_hash),
            AbiValue::from(*previous_hash),
            AbiValue::from(ipfs_cid),
        ],
    )
}

pub fn get_version_count(decision: &DecisionId) -> Vec<u8> {
    encode_call_data(
        Function::GetVersionCount.selector(),
        &[AbiValue::Bytes32(decision.to_bytes32())],
    )
}

pub fn get_version(decision: &DecisionId, index: u64) -> Vec<u8> {
    encode_call_data(
        Function::GetVersion.selector(),
        &[AbiValue::Bytes32(decision.to_bytes32()), AbiValue::from(index)],
    )
}

pub fn get_latest_version(decision: &DecisionId) -> Vec<u8> {
    encode_call_data(
        Function::GetLatestVersion.selector(),
        &[AbiValue::Bytes32(decision.to_bytes32())],
    )
}

pub fn verify_hash(decision: &DecisionId, index: u64, content_hash: &ContentHash) -> Vec<u8> {
    encode_call_data(
        Function::VerifyHash.selector(),
        &[
            AbiValue::Bytes32(decision.to_bytes32()),
            AbiValue::from(index),
            AbiValue::from(*content_hash),
        ],
    )
}

pub fn decision_exists(decision: &DecisionId) -> Vec<u8> {
    encode_call_data(
        Function::DecisionExists.selector(),
        &[AbiValue::Bytes32(decision.to_bytes32())],
    )
}
