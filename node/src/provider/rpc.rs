// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use attest_kernel::types::address::Address;
use attest_kernel::types::encode_hex;
use attest_kernel::TxHash;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::types::{CallRequest, ChainParams, HexBytes, Quantity, TxReceipt, TxRequest};
use super::{Provider, ProviderResult};
use crate::errors::ProviderError;

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 over HTTP.
#[derive(Debug)]
pub struct JsonRpcProvider {
    url: String,
    client: Client,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> ProviderResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::trace!(method, id, "rpc request");
        let resp = self.client.post(&self.url).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(ProviderError::Transport(format!("{} failed: {}", method, resp.status())));
        }

        let envelope: RpcResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if let Some(err) = envelope.error {
            return Err(ProviderError::Rpc { code: err.code, message: err.message });
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| ProviderError::Malformed(format!("{}: {}", method, e)))
    }
}

#[async_trait]
impl Provider for JsonRpcProvider {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.request("eth_requestAccounts", json!([])).await
    }

    async fn accounts(&self) -> ProviderResult<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        let id: Quantity = self.request("eth_chainId", json!([])).await?;
        Ok(id.0)
    }

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()> {
        let _: Value = self
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": format!("{:#x}", chain_id) }]),
            )
            .await?;
        Ok(())
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        let _: Value = self.request("wallet_addEthereumChain", json!([params])).await?;
        Ok(())
    }

    async fn send_transaction(&self, tx: &TxRequest) -> ProviderResult<TxHash> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    async fn call(&self, call: &CallRequest) -> ProviderResult<Vec<u8>> {
        let out: HexBytes = self.request("eth_call", json!([call, "latest"])).await?;
        Ok(out.0)
    }

    async fn transaction_receipt(&self, tx_hash: &TxHash) -> ProviderResult<Option<TxReceipt>> {
        self.request("eth_getTransactionReceipt", json!([tx_hash])).await
    }

    async fn sign_message(&self, address: &Address, message: &str) -> ProviderResult<String> {
        self.request("personal_sign", json!([encode_hex(message.as_bytes()), address]))
            .await
    }
}
