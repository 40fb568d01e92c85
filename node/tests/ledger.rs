// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use attest_kernel::chain::AnchorState;
use attest_kernel::{ContentHash, KernelError, VersionNumber};
use attest_node::ledger::AnchorOutcome;
use attest_node::{
    AnchorConfig, AnchorError, AnchorPhase, ChainAnchorClient, DecisionLedger, MemoryStore,
    NetworkConfig, Wallet,
};
use common::*;

fn ledger(provider: Arc<FakeProvider>, network: NetworkConfig, anchor: AnchorConfig) -> DecisionLedger {
    let client = ChainAnchorClient::new(Wallet::new(provider, network), anchor);
    DecisionLedger::new(Arc::new(MemoryStore::new()), client)
}

fn deployed(provider: Arc<FakeProvider>) -> DecisionLedger {
    ledger(provider, deployed_network(), fast_anchor_config())
}

#[tokio::test]
async fn test_create_and_edit_keep_chain_valid() {
    let ledger = deployed(FakeProvider::connected());
    let record = ledger.create_decision("Adopt Rust", "v1 text", None).await.unwrap();
    let id = record.id();

    let v2 = ledger.edit_decision(&id, "v2 text", Some(ACCOUNT)).await.unwrap();
    assert_eq!(v2.number(), VersionNumber(2));
    assert_eq!(v2.previous_hash(), record.decision.versions()[0].content_hash());
    assert_eq!(v2.editor(), Some(ACCOUNT));

    let result = ledger.validate(&id).await.unwrap();
    assert!(result.is_valid());
    assert_eq!(result.checked, 2);
}

#[tokio::test]
async fn test_concurrent_edits_serialize() {
    let ledger = Arc::new(deployed(FakeProvider::connected()));
    let id = ledger.create_decision("t", "base", None).await.unwrap().id();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.edit_decision(&id, &format!("edit {}", i), None).await })
        })
        .collect();
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert_eq!(snapshot.decision.current_version(), Some(VersionNumber(17)));
    assert!(snapshot.decision.validate().is_valid());
}

#[tokio::test]
async fn test_unknown_decision() {
    let ledger = deployed(FakeProvider::connected());
    let id = attest_kernel::DecisionId(uuid::Uuid::nil());
    assert!(matches!(
        ledger.edit_decision(&id, "x", None).await,
        Err(AnchorError::DecisionNotFound(_))
    ));
}

#[tokio::test]
async fn test_undeployed_anchor_is_refused() {
    let ledger = ledger(FakeProvider::connected(), NetworkConfig::default(), AnchorConfig::default());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    assert!(matches!(
        ledger.anchor_latest(&id, "").await,
        Err(AnchorError::ContractNotDeployed)
    ));
    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert_eq!(*snapshot.decision.versions()[0].anchor(), AnchorState::Unanchored);
}

#[tokio::test]
async fn test_simulated_anchor_is_not_verified() {
    let provider = FakeProvider::connected();
    let anchor = AnchorConfig {
        simulate_when_undeployed: true,
        ..AnchorConfig::default()
    };
    let ledger = ledger(provider.clone(), NetworkConfig::default(), anchor);
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    let outcome = ledger.anchor_latest(&id, "").await.unwrap();
    assert!(matches!(outcome, AnchorOutcome::Simulated { version: VersionNumber(1), .. }));

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    let v1 = &snapshot.decision.versions()[0];
    assert!(v1.is_simulated());
    assert!(!v1.is_verified());
    assert_eq!(v1.tx_hash(), Some(&outcome.tx_hash()));
    assert!(provider.methods().is_empty());

    // Simulated versions are skipped by the on-chain check
    assert!(ledger.check_on_chain(&id).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_anchor_marks_verified() {
    let provider = FakeProvider::connected();
    provider.push_receipt(Some(receipt(TX, true)));
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    let outcome = ledger.anchor_latest(&id, "bafy").await.unwrap();
    assert_eq!(outcome.tx_hash(), TX);

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert!(snapshot.decision.versions()[0].is_verified());
    assert!(snapshot.pending.is_empty());

    // Same version twice
    assert!(matches!(
        ledger.anchor_latest(&id, "bafy").await,
        Err(AnchorError::Kernel(KernelError::AlreadyAnchored))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_failed_anchor_leaves_version_unverified() {
    let provider = FakeProvider::connected();
    provider.push_receipt(Some(receipt(TX, false)));
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    assert!(matches!(
        ledger.anchor_latest(&id, "").await,
        Err(AnchorError::TxFailed(tx)) if tx == TX
    ));

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert_eq!(*snapshot.decision.versions()[0].anchor(), AnchorState::Unanchored);
    assert!(snapshot.pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_anchor_settles_on_recheck() {
    let provider = FakeProvider::connected();
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    let err = ledger.anchor_latest(&id, "").await.unwrap_err();
    assert!(err.is_ambiguous());

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert_eq!(snapshot.pending.get(&VersionNumber(1)), Some(&TX));
    assert!(!snapshot.decision.versions()[0].is_verified());

    // Still unmined
    let status = ledger.recheck_pending(&id).await.unwrap();
    assert_eq!(status[0].phase, AnchorPhase::Pending);

    // While pending, a second submission is refused
    assert!(matches!(
        ledger.anchor_latest(&id, "").await,
        Err(AnchorError::Kernel(KernelError::AlreadyAnchored))
    ));

    provider.push_receipt(Some(receipt(TX, true)));
    let status = ledger.recheck_pending(&id).await.unwrap();
    assert_eq!(status[0].phase, AnchorPhase::Confirmed);

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert!(snapshot.pending.is_empty());
    assert!(snapshot.decision.versions()[0].is_verified());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_anchors_submit_once() {
    let provider = FakeProvider::connected();
    *provider.submit_delay.lock().unwrap() = Some(Duration::from_millis(50));
    provider.push_receipt(Some(receipt(TX, true)));
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    let (a, b) = tokio::join!(ledger.anchor_latest(&id, ""), ledger.anchor_latest(&id, ""));

    assert!(a.is_ok());
    assert!(matches!(
        b,
        Err(AnchorError::AnchorInProgress(d, VersionNumber(1))) if d == id
    ));
    assert_eq!(provider.sent.lock().unwrap().len(), 1);
    assert!(!ledger.store().is_reserved(&id, VersionNumber(1)));

    let snapshot = ledger.store().snapshot(&id).await.unwrap();
    assert!(snapshot.decision.versions()[0].is_verified());
}

#[tokio::test(start_paused = true)]
async fn test_reservation_released_after_failed_submit() {
    let provider = FakeProvider::disconnected();
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();

    assert!(matches!(
        ledger.anchor_latest(&id, "").await,
        Err(AnchorError::NoWalletConnected)
    ));
    assert!(!ledger.store().is_reserved(&id, VersionNumber(1)));

    *provider.accounts.lock().unwrap() = vec![ACCOUNT];
    provider.push_receipt(Some(receipt(TX, true)));
    assert!(ledger.anchor_latest(&id, "").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_check_on_chain_finds_index_when_earlier_version_unanchored() {
    use attest_kernel::abi::calls;

    let provider = FakeProvider::connected();
    provider.push_receipt(Some(receipt(TX, true)));
    let ledger = deployed(provider.clone());
    let record = ledger.create_decision("t", "first", None).await.unwrap();
    let id = record.id();
    let v1_hash = record.decision.versions()[0].content_hash();
    let v2 = ledger.edit_decision(&id, "second", None).await.unwrap();
    ledger.anchor_latest(&id, "").await.unwrap();

    // v2 is the only record, at contract index 0
    provider.respond_word(calls::get_version_count(&id), 1);
    provider.respond(calls::get_version(&id, 0), record_bytes(&v2.content_hash(), &v1_hash));
    provider.respond_word(calls::verify_hash(&id, 0, &v2.content_hash()), 1);

    let checks = ledger.check_on_chain(&id).await.unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].version, VersionNumber(2));
    assert!(checks[0].on_chain);
}

#[tokio::test(start_paused = true)]
async fn test_check_on_chain_without_records_is_off_chain() {
    let provider = FakeProvider::connected();
    provider.push_receipt(Some(receipt(TX, true)));
    let ledger = deployed(provider.clone());
    let id = ledger.create_decision("t", "c", None).await.unwrap().id();
    ledger.anchor_latest(&id, "").await.unwrap();

    provider.fail_calls.store(true, Ordering::SeqCst);
    let checks = ledger.check_on_chain(&id).await.unwrap();
    assert_eq!(checks.len(), 1);
    assert!(!checks[0].on_chain);
}

#[tokio::test(start_paused = true)]
async fn test_check_on_chain_and_reconcile() {
    use attest_kernel::abi::calls;

    let provider = FakeProvider::connected();
    provider.push_receipt(Some(receipt(TX, true)));
    let ledger = deployed(provider.clone());
    let record = ledger.create_decision("t", "first", None).await.unwrap();
    let id = record.id();
    ledger.anchor_latest(&id, "").await.unwrap();
    let v2 = ledger.edit_decision(&id, "second", None).await.unwrap();

    // Chain holds v1 only
    let v1_hash = record.decision.versions()[0].content_hash();
    provider.respond_word(calls::get_version_count(&id), 1);
    provider.respond(calls::get_version(&id, 0), record_bytes(&v1_hash, &ContentHash::NULL));
    provider.respond_word(calls::verify_hash(&id, 0, &v1_hash), 1);

    let checks = ledger.check_on_chain(&id).await.unwrap();
    assert_eq!(checks.len(), 1);
    assert!(checks[0].on_chain);

    let report = ledger.reconcile(&id).await.unwrap();
    assert!(report.is_consistent());
    assert_eq!(report.matched(), 1);
    assert_eq!(v2.number(), VersionNumber(2));
}
