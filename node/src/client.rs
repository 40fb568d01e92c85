// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain Anchor Client
//!
//! Writes a version's hash to the registry contract and reads it back.
//!
//! # Write path
//! ```text
//! Idle → Submitting → Pending(tx) → Confirmed | Failed | TimedOut
//! ```
//! [`ChainAnchorClient::submit_version`] stops at `Pending` and hands the
//! transaction hash back so it can be persisted before any polling starts.
//! [`ChainAnchorClient::confirm`] drives it the rest of the way.
//!
//! # Read path
//! Advisory reads never fail. An undeployed contract, a provider error or
//! undecodable return data all answer `false`/`0`/`None`.

use std::sync::Arc;

use attest_kernel::abi::{self, calls};
use attest_kernel::proof::AnchorRecord;
use attest_kernel::types::address::Address;
use attest_kernel::{ContentHash, DecisionId, TxHash, VersionNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::{AnchorConfig, NetworkConfig};
use crate::errors::{AnchorError, AnchorResult};
use crate::provider::{CallRequest, HexBytes, Provider, Quantity, TxReceipt, TxRequest};
use crate::telemetry;
use crate::wallet::Wallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPhase {
    Idle,
    Submitting,
    Pending,
    Confirmed,
    Failed,
    TimedOut,
}

/// A submitted, not yet confirmed, `recordVersion` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAnchor {
    pub tx_hash: TxHash,
    pub from: Address,
    pub submitted_at: DateTime<Utc>,
}

/// Final state of a mined anchor transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorReceipt {
    pub tx_hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
    pub attempts: u32,
}

impl AnchorReceipt {
    pub fn phase(&self) -> AnchorPhase {
        if self.success {
            AnchorPhase::Confirmed
        } else {
            AnchorPhase::Failed
        }
    }
}

#[derive(Clone)]
pub struct ChainAnchorClient {
    wallet: Wallet,
    anchor: AnchorConfig,
}

impl ChainAnchorClient {
    pub fn new(wallet: Wallet, anchor: AnchorConfig) -> Self {
        Self { wallet, anchor }
    }

    pub fn network(&self) -> &NetworkConfig {
        self.wallet.network()
    }

    pub fn anchor_config(&self) -> &AnchorConfig {
        &self.anchor
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn is_contract_deployed(&self) -> bool {
        self.network().is_contract_deployed()
    }

    fn provider(&self) -> &Arc<dyn Provider> {
        self.wallet.provider()
    }

    /// Submits `recordVersion` and returns as soon as the provider hands back
    /// a transaction hash.
    pub async fn submit_version(
        &self,
        decision: &DecisionId,
        content_hash: &ContentHash,
        previous_hash: &ContentHash,
        ipfs_cid: &str,
    ) -> AnchorResult<PendingAnchor> {
        if !self.is_contract_deployed() {
            return Err(AnchorError::ContractNotDeployed);
        }

        self.wallet.ensure_network().await?;
        let from = self.wallet.signer().await?;

        let tx = TxRequest {
            from,
            to: self.network().contract_address,
            data: HexBytes(calls::record_version(decision, content_hash, previous_hash, ipfs_cid)),
            gas: Quantity(self.anchor.gas_limit),
        };

        let tx_hash = self.provider().send_transaction(&tx).await.map_err(|e| {
            tracing::error!(%decision, error = %e, "anchor submission failed");
            AnchorError::from(e)
        })?;

        metrics::increment_counter!(telemetry::ANCHORS_SUBMITTED);
        tracing::info!(%decision, %tx_hash, %content_hash, "anchor pending");

        Ok(PendingAnchor {
            tx_hash,
            from,
            submitted_at: Utc::now(),
        })
    }

    pub async fn confirm(&self, pending: &PendingAnchor) -> AnchorResult<AnchorReceipt> {
        self.confirm_with_cancel(pending, &CancellationToken::new()).await
    }

    /// Polls for the receipt every `poll_interval`, at most
    /// `max_poll_attempts` times. A mined receipt with failure status is
    /// `Ok` with `success == false`.
    ///
    /// Running out of attempts is `TxTimedOut` when the provider answered at
    /// least once, and `ReceiptUnavailable` with the last provider error when
    /// every poll failed.
    pub async fn confirm_with_cancel(
        &self,
        pending: &PendingAnchor,
        cancel: &CancellationToken,
    ) -> AnchorResult<AnchorReceipt> {
        let tx_hash = pending.tx_hash;
        let mut answered = false;
        let mut last_error = None;

        for attempt in 1..=self.anchor.max_poll_attempts {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::warn!(%tx_hash, attempt, "receipt polling cancelled");
                    return Err(AnchorError::Cancelled(tx_hash));
                }
                _ = tokio::time::sleep(self.anchor.poll_interval) => {}
            }

            match self.provider().transaction_receipt(&tx_hash).await {
                Ok(Some(receipt)) => return Ok(self.finish(receipt, attempt)),
                Ok(None) => answered = true,
                Err(e) => {
                    tracing::debug!(%tx_hash, attempt, error = %e, "receipt poll failed");
                    last_error = Some(e);
                }
            }
        }

        metrics::increment_counter!(telemetry::ANCHORS_TIMED_OUT);
        metrics::histogram!(telemetry::RECEIPT_POLLS, self.anchor.max_poll_attempts as f64);

        if let (false, Some(source)) = (answered, last_error) {
            tracing::error!(%tx_hash, attempts = self.anchor.max_poll_attempts, error = %source, "no receipt poll succeeded");
            return Err(AnchorError::ReceiptUnavailable { tx_hash, source });
        }

        tracing::warn!(%tx_hash, attempts = self.anchor.max_poll_attempts, "anchor timed out");

        Err(AnchorError::TxTimedOut {
            tx_hash,
            attempts: self.anchor.max_poll_attempts,
        })
    }

    fn finish(&self, receipt: TxReceipt, attempts: u32) -> AnchorReceipt {
        let out = AnchorReceipt {
            tx_hash: receipt.transaction_hash,
            success: receipt.is_success(),
            block_number: receipt.block_number.map(|q| q.0),
            attempts,
        };

        metrics::histogram!(telemetry::RECEIPT_POLLS, attempts as f64);
        if out.success {
            metrics::increment_counter!(telemetry::ANCHORS_CONFIRMED);
            tracing::info!(tx_hash = %out.tx_hash, attempts, "anchor confirmed");
        } else {
            metrics::increment_counter!(telemetry::ANCHORS_FAILED);
            tracing::warn!(tx_hash = %out.tx_hash, attempts, "anchor transaction failed");
        }
        out
    }

    /// Submit and wait. Returns the transaction hash and success flag.
    pub async fn anchor_version(
        &self,
        decision: &DecisionId,
        content_hash: &ContentHash,
        previous_hash: &ContentHash,
        ipfs_cid: &str,
    ) -> AnchorResult<AnchorReceipt> {
        let pending = self
            .submit_version(decision, content_hash, previous_hash, ipfs_cid)
            .await?;
        self.confirm(&pending).await
    }

    /// One receipt lookup, no waiting. Used to settle timed-out anchors later.
    pub async fn receipt(&self, tx_hash: &TxHash) -> AnchorResult<Option<TxReceipt>> {
        Ok(self.provider().transaction_receipt(tx_hash).await?)
    }

    // Advisory reads

    async fn advisory_call(&self, what: &'static str, data: Vec<u8>) -> Option<Vec<u8>> {
        if !self.is_contract_deployed() {
            tracing::debug!(what, "contract not deployed, skipping read");
            return None;
        }

        match self.call(data).await {
            Ok(out) => Some(out),
            Err(e) => {
                metrics::increment_counter!(telemetry::DEGRADED_READS);
                tracing::warn!(what, error = %e, "read failed, using default");
                None
            }
        }
    }

    async fn call(&self, data: Vec<u8>) -> AnchorResult<Vec<u8>> {
        let req = CallRequest {
            to: self.network().contract_address,
            data: HexBytes(data),
        };
        Ok(self.provider().call(&req).await?)
    }

    fn degrade<T: Default>(what: &'static str, decoded: attest_kernel::KernelResult<T>) -> T {
        decoded.unwrap_or_else(|e| {
            metrics::increment_counter!(telemetry::DEGRADED_READS);
            tracing::warn!(what, error = %e, "undecodable return data, using default");
            T::default()
        })
    }

    /// Whether the contract holds `content_hash` at `index` (0-based).
    pub async fn verify_hash(&self, decision: &DecisionId, index: u64, content_hash: &ContentHash) -> bool {
        match self
            .advisory_call("verifyHash", calls::verify_hash(decision, index, content_hash))
            .await
        {
            Some(out) => Self::degrade("verifyHash", abi::decode_bool(&out)),
            None => false,
        }
    }

    /// [`verify_hash`](Self::verify_hash) by local version number.
    ///
    /// Only correct when every earlier version was anchored in order.
    /// [`DecisionLedger::check_on_chain`](crate::ledger::DecisionLedger::check_on_chain)
    /// resolves the index from the on-chain records instead.
    pub async fn verify_on_chain(
        &self,
        decision: &DecisionId,
        version: VersionNumber,
        content_hash: &ContentHash,
    ) -> bool {
        self.verify_hash(decision, version.chain_index(), content_hash).await
    }

    pub async fn version_count(&self, decision: &DecisionId) -> u64 {
        match self
            .advisory_call("getVersionCount", calls::get_version_count(decision))
            .await
        {
            Some(out) => Self::degrade("getVersionCount", abi::decode_u64(&out)),
            None => 0,
        }
    }

    pub async fn decision_exists(&self, decision: &DecisionId) -> bool {
        match self
            .advisory_call("decisionExists", calls::decision_exists(decision))
            .await
        {
            Some(out) => Self::degrade("decisionExists", abi::decode_bool(&out)),
            None => false,
        }
    }

    pub async fn latest_version(&self, decision: &DecisionId) -> Option<AnchorRecord> {
        let out = self
            .advisory_call("getLatestVersion", calls::get_latest_version(decision))
            .await?;
        Self::degrade("getLatestVersion", abi::decode_anchor_record(&out).map(Some))
    }

    pub async fn version_at(&self, decision: &DecisionId, index: u64) -> Option<AnchorRecord> {
        let out = self
            .advisory_call("getVersion", calls::get_version(decision, index))
            .await?;
        Self::degrade("getVersion", abi::decode_anchor_record(&out).map(Some))
    }

    /// Every on-chain record for `decision`, in contract order.
    ///
    /// Unlike the advisory reads this is strict: any failure is returned.
    pub async fn records(&self, decision: &DecisionId) -> AnchorResult<Vec<AnchorRecord>> {
        if !self.is_contract_deployed() {
            return Err(AnchorError::ContractNotDeployed);
        }

        let count = abi::decode_u64(&self.call(calls::get_version_count(decision)).await?)?;
        let fetches = (0..count).map(|i| self.call(calls::get_version(decision, i)));

        futures::future::try_join_all(fetches)
            .await?
            .iter()
            .map(|out| abi::decode_anchor_record(out).map_err(AnchorError::from))
            .collect()
    }
}
