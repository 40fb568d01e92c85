// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Account and chain access.
//!
//! Everything the anchor client needs from the outside world goes through
//! [`Provider`], so tests can script responses without a network.

pub mod rpc;
pub mod types;

use async_trait::async_trait;
use attest_kernel::types::address::Address;
use attest_kernel::TxHash;

use crate::errors::ProviderError;
pub use rpc::JsonRpcProvider;
pub use types::{CallRequest, ChainParams, HexBytes, Quantity, TxReceipt, TxRequest};

pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Prompts for account access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Already-authorized accounts (`eth_accounts`). Empty when disconnected.
    async fn accounts(&self) -> ProviderResult<Vec<Address>>;

    async fn chain_id(&self) -> ProviderResult<u64>;

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()>;

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()>;

    async fn send_transaction(&self, tx: &TxRequest) -> ProviderResult<TxHash>;

    /// Read-only call against the latest block.
    async fn call(&self, call: &CallRequest) -> ProviderResult<Vec<u8>>;

    /// `None` while the transaction is unmined.
    async fn transaction_receipt(&self, tx_hash: &TxHash) -> ProviderResult<Option<TxReceipt>>;

    async fn sign_message(&self, address: &Address, message: &str) -> ProviderResult<String>;
}
