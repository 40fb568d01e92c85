//! On-Chain Anchor Records.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::chain::Version;
use crate::types::address::Address;
use crate::types::hash::ContentHash;

/// What the registry contract stores for one recorded version.
///
/// This is the ground truth a local version chain is checked against. The
/// contract keeps one array per decision, indexed from 0 in submission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnchorRecord {
    pub content_hash: ContentHash,

    /// Null sentinel for the first recorded version.
    pub previous_hash: ContentHash,

    /// Content-addressed storage identifier, passed through opaquely.
    pub ipfs_cid: String,

    /// Account that submitted the transaction.
    pub editor: Address,

    /// Block timestamp, seconds since the Unix epoch.
    pub timestamp: u64,
}

impl AnchorRecord {
    /// Same content and same predecessor link.
    pub fn matches(&self, version: &Version) -> bool {
        self.content_hash == version.content_hash() && self.previous_hash == version.previous_hash()
    }
}
