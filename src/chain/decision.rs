// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Decision: the owner of one version chain.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::chain::validate::{self, ValidationResult};
use crate::chain::version::Version;
use crate::error::{KernelError, Result};
use crate::hash::{hash_content_with, HashBackend};
use crate::types::address::Address;
use crate::types::hash::{ContentHash, TxHash};
use crate::types::id::{DecisionId, VersionNumber};

/// Ordered, append-only list of versions.
///
/// `current_version` is derived from the stored versions rather than kept as
/// a separate counter, so the two can never disagree.
///
/// Appends assume a single writer per decision. Callers sharing a decision
/// across tasks must hold an exclusive lock around `append` (the node's
/// `MemoryStore` does this per decision).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    id: DecisionId,
    versions: Vec<Version>,
}

impl Decision {
    pub fn new(id: DecisionId) -> Self {
        Self { id, versions: Vec::new() }
    }

    /// Rebuilds a decision from stored versions, kept in the given order.
    pub fn from_versions(id: DecisionId, versions: Vec<Version>) -> Self {
        Self { id, versions }
    }

    pub fn id(&self) -> DecisionId {
        self.id
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Highest stored version number, `None` for an empty decision.
    pub fn current_version(&self) -> Option<VersionNumber> {
        self.versions.iter().map(|v| v.number()).max()
    }

    pub fn latest(&self) -> Option<&Version> {
        self.versions.iter().max_by_key(|v| v.number())
    }

    pub fn get(&self, number: VersionNumber) -> Option<&Version> {
        self.versions.iter().find(|v| v.number() == number)
    }

    /// Appends `content` as the next version.
    pub fn append(&mut self, content: impl Into<String>) -> &Version {
        self.append_with(HashBackend::Native, content, None)
    }

    pub fn append_by(&mut self, content: impl Into<String>, editor: Address) -> &Version {
        self.append_with(HashBackend::Native, content, Some(editor))
    }

    pub fn append_with(
        &mut self,
        backend: HashBackend,
        content: impl Into<String>,
        editor: Option<Address>,
    ) -> &Version {
        let content = content.into();
        let content_hash = hash_content_with(backend, &content);

        let (number, previous_hash) = match self.latest() {
            Some(prev) => (prev.number().next(), prev.content_hash()),
            None => (VersionNumber::FIRST, ContentHash::NULL),
        };

        let idx = self.versions.len();
        self.versions.push(Version::new(
            self.id,
            number,
            content,
            content_hash,
            previous_hash,
            editor,
        ));
        &self.versions[idx]
    }

    pub fn mark_anchored(&mut self, number: VersionNumber, tx_hash: TxHash) -> Result<()> {
        self.version_mut(number)?.mark_anchored(tx_hash)
    }

    pub fn mark_simulated(&mut self, number: VersionNumber, tx_hash: TxHash) -> Result<()> {
        self.version_mut(number)?.mark_simulated(tx_hash)
    }

    /// Checks hash linkage and numbering. Never mutates.
    pub fn validate(&self) -> ValidationResult {
        validate::validate_chain(&self.versions)
    }

    /// First version whose stored content hash differs from a fresh digest.
    pub fn audit_contents(&self) -> Option<VersionNumber> {
        validate::audit_contents(&self.versions)
    }

    fn version_mut(&mut self, number: VersionNumber) -> Result<&mut Version> {
        self.versions
            .iter_mut()
            .find(|v| v.number() == number)
            .ok_or(KernelError::NotFound)
    }
}
