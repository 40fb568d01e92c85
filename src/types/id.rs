//! Identity types.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{FIRST_VERSION, WORD_LEN};
use crate::error::{KernelError, Result};

/// Decision identifier. Decisions are keyed by UUID off chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DecisionId(pub Uuid);

impl DecisionId {
    /// Accepts hyphenated, simple, braced and URN UUID text.
    pub fn parse(text: &str) -> Result<Self> {
        Uuid::parse_str(text.trim())
            .map(DecisionId)
            .map_err(|_| KernelError::InvalidDecisionId)
    }

    /// On-chain key: the 16 UUID bytes followed by 16 zero bytes.
    pub fn to_bytes32(&self) -> [u8; WORD_LEN] {
        let mut out = [0u8; WORD_LEN];
        out[..16].copy_from_slice(self.0.as_bytes());
        out
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for DecisionId {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        DecisionId::parse(s)
    }
}

impl From<Uuid> for DecisionId {
    fn from(id: Uuid) -> Self {
        DecisionId(id)
    }
}

/// Position of a version within its decision, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct VersionNumber(pub u64);

impl VersionNumber {
    pub const FIRST: VersionNumber = VersionNumber(FIRST_VERSION);

    pub fn next(&self) -> Self {
        VersionNumber(self.0 + 1)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Index of this version in the contract's 0-based version array.
    pub fn chain_index(&self) -> u64 {
        self.0.saturating_sub(FIRST_VERSION)
    }

    pub fn from_chain_index(index: u64) -> Self {
        VersionNumber(index + FIRST_VERSION)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
