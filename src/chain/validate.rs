// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Hash-chain validation.
//!
//! # Invariants checked
//! - Version numbers are contiguous, starting at 1, no duplicates
//! - Version 1 carries the null previous hash
//! - Version N > 1 carries the content hash of version N-1 as previous hash
//!
//! Validation walks versions in ascending number order regardless of how
//! they are stored, reports the first break and repairs nothing.

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::chain::version::Version;
use crate::error::{KernelError, Result};
use crate::hash::hash_content;
use crate::types::hash::ContentHash;
use crate::types::id::VersionNumber;

/// The first point where a chain breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainViolation {
    /// `previous_hash` of `version` does not link to its predecessor
    /// (or is not the null sentinel for version 1).
    HashMismatch {
        version: VersionNumber,
        expected: ContentHash,
        found: ContentHash,
    },
    /// A number was skipped: `expected` was next, `found` came instead.
    MissingVersion {
        expected: VersionNumber,
        found: VersionNumber,
    },
    /// The same number appears more than once.
    DuplicateVersion { version: VersionNumber },
}

impl ChainViolation {
    pub fn version(&self) -> VersionNumber {
        match self {
            ChainViolation::HashMismatch { version, .. } => *version,
            ChainViolation::MissingVersion { found, .. } => *found,
            ChainViolation::DuplicateVersion { version } => *version,
        }
    }
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainViolation::HashMismatch { version, expected, found } => {
                write!(f, "{} links to {} but predecessor hash is {}", version, found, expected)
            }
            ChainViolation::MissingVersion { expected, found } => {
                write!(f, "expected {} but found {}", expected, found)
            }
            ChainViolation::DuplicateVersion { version } => write!(f, "duplicate {}", version),
        }
    }
}

/// Outcome of a chain walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Versions confirmed before the walk stopped.
    pub checked: usize,
    pub violation: Option<ChainViolation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    pub fn violation(&self) -> Option<&ChainViolation> {
        self.violation.as_ref()
    }

    /// Number of versions checked, or `ChainIntegrity` on a break.
    pub fn into_result(self) -> Result<usize> {
        match self.violation {
            None => Ok(self.checked),
            Some(v) => Err(KernelError::ChainIntegrity(v)),
        }
    }
}

pub fn validate_chain(versions: &[Version]) -> ValidationResult {
    let mut ordered: Vec<&Version> = versions.iter().collect();
    ordered.sort_by_key(|v| v.number());

    let mut expected_number = VersionNumber::FIRST;
    let mut expected_prev = ContentHash::NULL;

    for (checked, version) in ordered.iter().enumerate() {
        if checked > 0 && version.number() < expected_number {
            return ValidationResult {
                checked,
                violation: Some(ChainViolation::DuplicateVersion { version: version.number() }),
            };
        }
        if version.number() != expected_number {
            return ValidationResult {
                checked,
                violation: Some(ChainViolation::MissingVersion {
                    expected: expected_number,
                    found: version.number(),
                }),
            };
        }
        if version.previous_hash() != expected_prev {
            return ValidationResult {
                checked,
                violation: Some(ChainViolation::HashMismatch {
                    version: version.number(),
                    expected: expected_prev,
                    found: version.previous_hash(),
                }),
            };
        }

        expected_number = version.number().next();
        expected_prev = version.content_hash();
    }

    ValidationResult {
        checked: ordered.len(),
        violation: None,
    }
}

pub fn audit_contents(versions: &[Version]) -> Option<VersionNumber> {
    let mut ordered: Vec<&Version> = versions.iter().collect();
    ordered.sort_by_key(|v| v.number());

    ordered
        .into_iter()
        .find(|v| hash_content(v.content()) != v.content_hash())
        .map(|v| v.number())
}
