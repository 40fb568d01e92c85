// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Decision Ledger - Create, Edit, Anchor, Check
//!
//! Composes the store with the anchor client. A version is marked verified
//! only after its transaction is confirmed with a success receipt.
//!
//! # Lock discipline
//! The per-decision lock is held while appending and while recording an
//! anchor outcome. It is released while waiting on the network, so edits
//! are never blocked by receipt polling.

use std::collections::HashMap;
use std::sync::Arc;

use attest_kernel::hash::HashBackend;
use attest_kernel::types::address::Address;
use attest_kernel::verify::{reconcile, Reconciliation, ReconcileReport};
use attest_kernel::{Decision, DecisionId, TxHash, ValidationResult, Version, VersionNumber};
use serde::Serialize;
use uuid::Uuid;

use crate::client::{AnchorPhase, AnchorReceipt, ChainAnchorClient};
use crate::errors::{AnchorError, AnchorResult};
use crate::store::{DecisionRecord, MemoryStore};
use crate::telemetry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnchorOutcome {
    Anchored { version: VersionNumber, receipt: AnchorReceipt },
    Simulated { version: VersionNumber, tx_hash: TxHash },
}

impl AnchorOutcome {
    pub fn tx_hash(&self) -> TxHash {
        match self {
            AnchorOutcome::Anchored { receipt, .. } => receipt.tx_hash,
            AnchorOutcome::Simulated { tx_hash, .. } => *tx_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingStatus {
    pub version: VersionNumber,
    pub tx_hash: TxHash,
    pub phase: AnchorPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnChainCheck {
    pub version: VersionNumber,
    pub on_chain: bool,
}

pub struct DecisionLedger {
    store: Arc<MemoryStore>,
    client: ChainAnchorClient,
}

impl DecisionLedger {
    pub fn new(store: Arc<MemoryStore>, client: ChainAnchorClient) -> Self {
        Self { store, client }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn client(&self) -> &ChainAnchorClient {
        &self.client
    }

    /// New decision with `content` as version 1.
    pub async fn create_decision(
        &self,
        title: &str,
        content: &str,
        editor: Option<Address>,
    ) -> AnchorResult<DecisionRecord> {
        let mut decision = Decision::new(DecisionId(Uuid::new_v4()));
        decision.append_with(HashBackend::Native, content, editor);

        let record = DecisionRecord::new(title, decision);
        self.store.insert(record.clone()).await;
        tracing::info!(decision = %record.id(), "decision created");
        Ok(record)
    }

    /// Appends `content` as the next version under the decision's lock.
    pub async fn edit_decision(
        &self,
        id: &DecisionId,
        content: &str,
        editor: Option<Address>,
    ) -> AnchorResult<Version> {
        let mut guard = self.store.lock(id).await?;
        let version = guard
            .decision
            .append_with(HashBackend::Native, content, editor)
            .clone();
        tracing::debug!(decision = %id, version = %version.number(), hash = %version.content_hash(), "version appended");
        Ok(version)
    }

    /// Anchors the latest version.
    ///
    /// Undeployed contract: simulated when enabled, `ContractNotDeployed`
    /// otherwise. A failed receipt leaves the version untouched. A timeout
    /// keeps the transaction hash as pending for [`recheck_pending`](Self::recheck_pending).
    ///
    /// The version is reserved before the lock is released, so a concurrent
    /// call for the same version gets `AnchorInProgress` and never submits.
    pub async fn anchor_latest(&self, id: &DecisionId, ipfs_cid: &str) -> AnchorResult<AnchorOutcome> {
        let (latest, _reservation) = {
            let guard = self.store.lock(id).await?;
            let latest = guard
                .decision
                .latest()
                .cloned()
                .ok_or(AnchorError::VersionNotFound(*id, VersionNumber::FIRST))?;
            if latest.tx_hash().is_some() || guard.pending.contains_key(&latest.number()) {
                return Err(attest_kernel::KernelError::AlreadyAnchored.into());
            }
            let reservation = self
                .store
                .reserve(id, latest.number())
                .ok_or(AnchorError::AnchorInProgress(*id, latest.number()))?;
            (latest, reservation)
        };
        let number = latest.number();

        if !self.client.is_contract_deployed() {
            if !self.client.anchor_config().simulate_when_undeployed {
                return Err(AnchorError::ContractNotDeployed);
            }
            let tx_hash = TxHash(rand::random());
            self.store.lock(id).await?.decision.mark_simulated(number, tx_hash)?;
            metrics::increment_counter!(telemetry::ANCHORS_SIMULATED);
            tracing::info!(decision = %id, version = %number, %tx_hash, "simulated anchor");
            return Ok(AnchorOutcome::Simulated { version: number, tx_hash });
        }

        let pending = self
            .client
            .submit_version(id, &latest.content_hash(), &latest.previous_hash(), ipfs_cid)
            .await?;
        self.store.lock(id).await?.pending.insert(number, pending.tx_hash);

        // On timeout the pending entry stays so the outcome can be settled later
        let receipt = self.client.confirm(&pending).await?;

        let mut guard = self.store.lock(id).await?;
        guard.pending.remove(&number);
        if !receipt.success {
            return Err(AnchorError::TxFailed(receipt.tx_hash));
        }
        guard.decision.mark_anchored(number, receipt.tx_hash)?;
        Ok(AnchorOutcome::Anchored { version: number, receipt })
    }

    /// One receipt lookup per pending anchor. Confirmed ones are marked
    /// verified, failed ones are dropped, the rest stay pending.
    pub async fn recheck_pending(&self, id: &DecisionId) -> AnchorResult<Vec<PendingStatus>> {
        let pending: Vec<_> = {
            let guard = self.store.lock(id).await?;
            guard.pending.iter().map(|(v, tx)| (*v, *tx)).collect()
        };

        let mut out = Vec::with_capacity(pending.len());
        for (version, tx_hash) in pending {
            let phase = match self.client.receipt(&tx_hash).await? {
                None => AnchorPhase::Pending,
                Some(receipt) => {
                    let mut guard = self.store.lock(id).await?;
                    guard.pending.remove(&version);
                    if receipt.is_success() {
                        guard.decision.mark_anchored(version, tx_hash)?;
                        AnchorPhase::Confirmed
                    } else {
                        AnchorPhase::Failed
                    }
                }
            };
            tracing::info!(decision = %id, %version, %tx_hash, ?phase, "pending anchor rechecked");
            out.push(PendingStatus { version, tx_hash, phase });
        }
        Ok(out)
    }

    /// Asks the contract about every locally verified version.
    ///
    /// Anchoring is optional per version, so the contract index of a version
    /// is found by matching it against the on-chain records rather than
    /// derived from its number. A version with no matching record, or any
    /// version when the records cannot be read, is reported off chain.
    pub async fn check_on_chain(&self, id: &DecisionId) -> AnchorResult<Vec<OnChainCheck>> {
        let record = self.store.snapshot(id).await?;
        let indices = self.chain_indices(&record.decision).await;

        let checks = record
            .decision
            .versions()
            .iter()
            .filter(|v| v.is_verified())
            .map(|v| {
                let index = indices.get(&v.number()).copied();
                async move {
                    let on_chain = match index {
                        Some(index) => self.client.verify_hash(id, index, &v.content_hash()).await,
                        None => false,
                    };
                    OnChainCheck {
                        version: v.number(),
                        on_chain,
                    }
                }
            });
        Ok(futures::future::join_all(checks).await)
    }

    /// Contract index of each local version that has a matching record.
    async fn chain_indices(&self, decision: &Decision) -> HashMap<VersionNumber, u64> {
        let records = match self.client.records(&decision.id()).await {
            Ok(records) => records,
            Err(e) => {
                metrics::increment_counter!(telemetry::DEGRADED_READS);
                tracing::warn!(decision = %decision.id(), error = %e, "on-chain records unavailable");
                return HashMap::new();
            }
        };

        reconcile(decision, &records)
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Reconciliation::Matched { version, index } => Some((*version, *index)),
                _ => None,
            })
            .collect()
    }

    pub async fn validate(&self, id: &DecisionId) -> AnchorResult<ValidationResult> {
        Ok(self.store.snapshot(id).await?.decision.validate())
    }

    pub async fn reconcile(&self, id: &DecisionId) -> AnchorResult<ReconcileReport> {
        let record = self.store.snapshot(id).await?;
        let records = self.client.records(id).await?;
        Ok(reconcile(&record.decision, &records))
    }
}
