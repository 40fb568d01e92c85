// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory decision store.
//!
//! Each decision sits behind its own async mutex. Holding the guard is the
//! append lock: the predecessor hash is read and the new version pushed
//! under the same guard, so two editors can never both extend the same
//! version.
//!
//! Anchors in flight are tracked outside the records as [`Reservation`]s,
//! released on drop, so an abandoned anchor never blocks the version.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex as SyncMutex};

use attest_kernel::{Decision, DecisionId, TxHash, VersionNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::errors::{AnchorError, AnchorResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub decision: Decision,
    /// Submitted anchors with no receipt yet, by version.
    #[serde(default)]
    pub pending: BTreeMap<VersionNumber, TxHash>,
}

impl DecisionRecord {
    pub fn new(title: impl Into<String>, decision: Decision) -> Self {
        Self {
            title: title.into(),
            created_at: Utc::now(),
            decision,
            pending: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> DecisionId {
        self.decision.id()
    }
}

pub type DecisionGuard = OwnedMutexGuard<DecisionRecord>;

#[derive(Default)]
pub struct MemoryStore {
    decisions: RwLock<HashMap<DecisionId, Arc<Mutex<DecisionRecord>>>>,
    in_flight: Arc<SyncMutex<HashSet<(DecisionId, VersionNumber)>>>,
}

/// Claim on anchoring one version. Dropping it releases the claim.
#[derive(Debug)]
pub struct Reservation {
    key: (DecisionId, VersionNumber),
    in_flight: Arc<SyncMutex<HashSet<(DecisionId, VersionNumber)>>>,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. An existing record with the same id is kept.
    pub async fn insert(&self, record: DecisionRecord) -> bool {
        let mut map = self.decisions.write().await;
        let id = record.id();
        if map.contains_key(&id) {
            return false;
        }
        map.insert(id, Arc::new(Mutex::new(record)));
        tracing::debug!(%id, "decision stored");
        true
    }

    /// Exclusive access to one decision until the guard drops.
    pub async fn lock(&self, id: &DecisionId) -> AnchorResult<DecisionGuard> {
        let entry = self
            .decisions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(AnchorError::DecisionNotFound(*id))?;
        Ok(entry.lock_owned().await)
    }

    /// Claims `version` for anchoring. `None` if another claim is live.
    ///
    /// Call while holding the decision's guard so the claim and the
    /// already-anchored checks see the same state.
    pub fn reserve(&self, id: &DecisionId, version: VersionNumber) -> Option<Reservation> {
        let key = (*id, version);
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(key) {
            return None;
        }
        Some(Reservation {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_reserved(&self, id: &DecisionId, version: VersionNumber) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(&(*id, version))
    }

    pub async fn snapshot(&self, id: &DecisionId) -> AnchorResult<DecisionRecord> {
        Ok(self.lock(id).await?.clone())
    }

    pub async fn ids(&self) -> Vec<DecisionId> {
        let mut ids: Vec<_> = self.decisions.read().await.keys().copied().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.decisions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_reservation_released_on_drop() {
        let store = MemoryStore::new();
        let id = DecisionId(Uuid::nil());

        let first = store.reserve(&id, VersionNumber(2));
        assert!(first.is_some());
        assert!(store.reserve(&id, VersionNumber(2)).is_none());
        assert!(store.reserve(&id, VersionNumber(3)).is_some());

        drop(first);
        assert!(!store.is_reserved(&id, VersionNumber(2)));
        assert!(store.reserve(&id, VersionNumber(2)).is_some());
    }
}
