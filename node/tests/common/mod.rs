// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use attest_kernel::abi::encode::uint_word;
use attest_kernel::types::address::Address;
use attest_kernel::{ContentHash, TxHash};
use attest_node::errors::{ProviderError, UNRECOGNIZED_CHAIN};
use attest_node::provider::{
    CallRequest, ChainParams, Provider, ProviderResult, Quantity, TxReceipt, TxRequest,
};
use attest_node::{AnchorConfig, ChainAnchorClient, NetworkConfig, Wallet};

pub const CONTRACT: Address = Address([0xc0; 20]);
pub const ACCOUNT: Address = Address([0xee; 20]);
pub const TX: TxHash = TxHash([0x77; 32]);

/// Scripted in-process provider. Records every method it is asked for.
#[derive(Default)]
pub struct FakeProvider {
    pub accounts: Mutex<Vec<Address>>,
    /// Popped one per receipt poll. Empty queue means "not mined yet".
    pub receipts: Mutex<VecDeque<ProviderResult<Option<TxReceipt>>>>,
    /// `eth_call` answers by exact call data. Unknown data answers `0x`.
    pub responses: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
    pub fail_calls: AtomicBool,
    pub unknown_chain: AtomicBool,
    pub sent: Mutex<Vec<TxRequest>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub receipt_polls: AtomicUsize,
    pub next_tx: Mutex<Option<TxHash>>,
    /// Holds `eth_sendTransaction` open for this long before answering.
    pub submit_delay: Mutex<Option<Duration>>,
}

impl FakeProvider {
    pub fn connected() -> Arc<Self> {
        let p = FakeProvider::default();
        *p.accounts.lock().unwrap() = vec![ACCOUNT];
        Arc::new(p)
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(FakeProvider::default())
    }

    pub fn push_receipt(&self, receipt: Option<TxReceipt>) {
        self.receipts.lock().unwrap().push_back(Ok(receipt));
    }

    pub fn push_receipt_error(&self) {
        self.receipts
            .lock()
            .unwrap()
            .push_back(Err(ProviderError::Transport("connection reset".into())));
    }

    pub fn respond(&self, data: Vec<u8>, out: Vec<u8>) {
        self.responses.lock().unwrap().insert(data, out);
    }

    pub fn respond_word(&self, data: Vec<u8>, n: u128) {
        self.respond(data, uint_word(n).to_vec());
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

pub fn receipt(tx: TxHash, success: bool) -> TxReceipt {
    TxReceipt {
        transaction_hash: tx,
        block_number: Some(Quantity(42)),
        gas_used: Some(Quantity(90_000)),
        status: Some(Quantity(success as u64)),
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.log("eth_requestAccounts");
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn accounts(&self) -> ProviderResult<Vec<Address>> {
        self.log("eth_accounts");
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.log("eth_chainId");
        Ok(8082)
    }

    async fn switch_chain(&self, _chain_id: u64) -> ProviderResult<()> {
        self.log("wallet_switchEthereumChain");
        if self.unknown_chain.load(Ordering::SeqCst) {
            return Err(ProviderError::Rpc {
                code: UNRECOGNIZED_CHAIN,
                message: "Unrecognized chain ID".into(),
            });
        }
        Ok(())
    }

    async fn add_chain(&self, _params: &ChainParams) -> ProviderResult<()> {
        self.log("wallet_addEthereumChain");
        self.unknown_chain.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn send_transaction(&self, tx: &TxRequest) -> ProviderResult<TxHash> {
        self.log("eth_sendTransaction");
        self.sent.lock().unwrap().push(tx.clone());
        let delay = *self.submit_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.next_tx.lock().unwrap().unwrap_or(TX))
    }

    async fn call(&self, call: &CallRequest) -> ProviderResult<Vec<u8>> {
        self.log("eth_call");
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(ProviderError::Transport("rpc unreachable".into()));
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&call.data.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn transaction_receipt(&self, _tx_hash: &TxHash) -> ProviderResult<Option<TxReceipt>> {
        self.log("eth_getTransactionReceipt");
        self.receipt_polls.fetch_add(1, Ordering::SeqCst);
        self.receipts.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn sign_message(&self, address: &Address, message: &str) -> ProviderResult<String> {
        self.log("personal_sign");
        Ok(format!("signed:{}:{}", address, message))
    }
}

pub fn deployed_network() -> NetworkConfig {
    NetworkConfig {
        contract_address: CONTRACT,
        ..NetworkConfig::default()
    }
}

pub fn client_with(provider: Arc<FakeProvider>, network: NetworkConfig) -> ChainAnchorClient {
    let wallet = Wallet::new(provider, network);
    ChainAnchorClient::new(wallet, AnchorConfig::default())
}

pub fn deployed_client(provider: Arc<FakeProvider>) -> ChainAnchorClient {
    client_with(provider, deployed_network())
}

pub fn fast_anchor_config() -> AnchorConfig {
    AnchorConfig {
        poll_interval: Duration::from_millis(10),
        max_poll_attempts: 5,
        ..AnchorConfig::default()
    }
}

pub fn fast_client(provider: Arc<FakeProvider>) -> ChainAnchorClient {
    ChainAnchorClient::new(Wallet::new(provider, deployed_network()), fast_anchor_config())
}

/// ABI-encoded `getVersion` return for a record linking `hash` to `prev`.
pub fn record_bytes(hash: &ContentHash, prev: &ContentHash) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(hash.as_bytes());
    out.extend_from_slice(prev.as_bytes());
    out.extend_from_slice(&uint_word(160));
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(&ACCOUNT.0);
    out.extend_from_slice(&uint_word(1_700_000_000));
    out.extend_from_slice(&uint_word(0));
    out
}
