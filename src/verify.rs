//! Reconciliation of local version chains with on-chain records.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::chain::Decision;
use crate::proof::AnchorRecord;
use crate::types::hash::ContentHash;
use crate::types::id::VersionNumber;

/// Per-item outcome of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Local version found on chain at `index`.
    Matched { version: VersionNumber, index: u64 },
    /// Local version with no on-chain record. `claimed_verified` is set when
    /// the local copy says it was anchored, which is a real discrepancy.
    LocalOnly { version: VersionNumber, claimed_verified: bool },
    /// On-chain record that no local version accounts for.
    ChainOnly { index: u64, content_hash: ContentHash },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub entries: Vec<Reconciliation>,
}

impl ReconcileReport {
    /// No verified version is missing on chain and no chain record is unknown.
    /// Versions that were simply never anchored do not count against this.
    pub fn is_consistent(&self) -> bool {
        self.entries.iter().all(|e| match e {
            Reconciliation::Matched { .. } => true,
            Reconciliation::LocalOnly { claimed_verified, .. } => !claimed_verified,
            Reconciliation::ChainOnly { .. } => false,
        })
    }

    pub fn matched(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Reconciliation::Matched { .. }))
            .count()
    }
}

/// Matches local versions to on-chain records by `(content_hash, previous_hash)`.
///
/// `records[i]` is the record at contract index `i`. Local versions are not
/// assumed to be anchored in order or at all, so matching is by link rather
/// than by position. Each record is consumed by at most one version.
pub fn reconcile(decision: &Decision, records: &[AnchorRecord]) -> ReconcileReport {
    let mut used = alloc::vec![false; records.len()];
    let mut entries = Vec::with_capacity(decision.len() + records.len());

    let mut versions: Vec<_> = decision.versions().iter().collect();
    versions.sort_by_key(|v| v.number());

    for version in versions {
        let hit = records
            .iter()
            .enumerate()
            .find(|(i, r)| !used[*i] && r.matches(version))
            .map(|(i, _)| i);

        match hit {
            Some(i) => {
                used[i] = true;
                entries.push(Reconciliation::Matched {
                    version: version.number(),
                    index: i as u64,
                });
            }
            None => entries.push(Reconciliation::LocalOnly {
                version: version.number(),
                claimed_verified: version.is_verified(),
            }),
        }
    }

    for (i, record) in records.iter().enumerate() {
        if !used[i] {
            entries.push(Reconciliation::ChainOnly {
                index: i as u64,
                content_hash: record.content_hash,
            });
        }
    }

    ReconcileReport { entries }
}
