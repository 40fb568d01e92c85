// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! A single immutable snapshot of decision content.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::types::address::Address;
use crate::types::hash::{ContentHash, TxHash};
use crate::types::id::{DecisionId, VersionNumber};

/// Whether (and how) a version's hash has been recorded on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnchorState {
    #[default]
    Unanchored,
    /// Recorded by a confirmed transaction.
    Anchored { tx_hash: TxHash },
    /// Offline/demo mode. Never counts as verified.
    Simulated { tx_hash: TxHash },
}

impl AnchorState {
    pub fn tx_hash(&self) -> Option<&TxHash> {
        match self {
            AnchorState::Unanchored => None,
            AnchorState::Anchored { tx_hash } | AnchorState::Simulated { tx_hash } => Some(tx_hash),
        }
    }
}

/// One entry of a decision's hash chain.
///
/// `content`, `content_hash` and `previous_hash` are fixed at construction.
/// Only the anchor state moves, and only once from `Unanchored`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    decision_id: DecisionId,
    number: VersionNumber,
    content: String,
    content_hash: ContentHash,
    /// Stored `null` (first versions written by older clients) reads as NULL.
    #[serde(default, deserialize_with = "null_as_sentinel")]
    previous_hash: ContentHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    editor: Option<Address>,
    #[serde(default)]
    anchor: AnchorState,
}

fn null_as_sentinel<'de, D>(d: D) -> core::result::Result<ContentHash, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<ContentHash>::deserialize(d).map(ContentHash::or_null)
}

impl Version {
    pub(crate) fn new(
        decision_id: DecisionId,
        number: VersionNumber,
        content: String,
        content_hash: ContentHash,
        previous_hash: ContentHash,
        editor: Option<Address>,
    ) -> Self {
        Self {
            decision_id,
            number,
            content,
            content_hash,
            previous_hash,
            editor,
            anchor: AnchorState::Unanchored,
        }
    }

    /// Rebuilds a version read back from storage.
    ///
    /// Nothing is checked here; run `validate` / `audit_contents` on the
    /// owning decision before trusting the result.
    pub fn from_parts(
        decision_id: DecisionId,
        number: VersionNumber,
        content: String,
        content_hash: ContentHash,
        previous_hash: ContentHash,
        editor: Option<Address>,
        anchor: AnchorState,
    ) -> Self {
        Self {
            decision_id,
            number,
            content,
            content_hash,
            previous_hash,
            editor,
            anchor,
        }
    }

    pub fn decision_id(&self) -> DecisionId {
        self.decision_id
    }

    pub fn number(&self) -> VersionNumber {
        self.number
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    pub fn previous_hash(&self) -> ContentHash {
        self.previous_hash
    }

    pub fn editor(&self) -> Option<Address> {
        self.editor
    }

    pub fn anchor(&self) -> &AnchorState {
        &self.anchor
    }

    /// True only for a real, confirmed on-chain record.
    pub fn is_verified(&self) -> bool {
        matches!(self.anchor, AnchorState::Anchored { .. })
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.anchor, AnchorState::Simulated { .. })
    }

    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.anchor.tx_hash()
    }

    pub fn mark_anchored(&mut self, tx_hash: TxHash) -> Result<()> {
        self.set_anchor(AnchorState::Anchored { tx_hash })
    }

    pub fn mark_simulated(&mut self, tx_hash: TxHash) -> Result<()> {
        self.set_anchor(AnchorState::Simulated { tx_hash })
    }

    fn set_anchor(&mut self, next: AnchorState) -> Result<()> {
        if self.anchor != AnchorState::Unanchored {
            return Err(KernelError::AlreadyAnchored);
        }
        self.anchor = next;
        Ok(())
    }
}
