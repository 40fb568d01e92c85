// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON-RPC wire types. Quantities and byte strings travel as `0x` hex text.

use attest_kernel::types::address::Address;
use attest_kernel::types::{decode_hex, encode_hex};
use attest_kernel::TxHash;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::NetworkConfig;

/// Integer in `0x`-prefixed hex, no leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(pub u64);

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{:#x}", self.0))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .ok_or_else(|| D::Error::custom("quantity missing 0x prefix"))?;
        if digits.is_empty() {
            return Ok(Quantity(0));
        }
        u64::from_str_radix(digits, 16).map(Quantity).map_err(D::Error::custom)
    }
}

/// Arbitrary byte string as `0x` hex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HexBytes(pub Vec<u8>);

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&encode_hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        decode_hex(&text).map(HexBytes).map_err(D::Error::custom)
    }
}

/// `eth_sendTransaction` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub data: HexBytes,
    pub gas: Quantity,
}

/// `eth_call` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: Address,
    pub data: HexBytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<Quantity>,
    /// `0x1` on success, `0x0` on revert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Quantity>,
}

impl TxReceipt {
    pub fn is_success(&self) -> bool {
        self.status == Some(Quantity(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// `wallet_addEthereumChain` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: CurrencyParams,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl From<&NetworkConfig> for ChainParams {
    fn from(cfg: &NetworkConfig) -> Self {
        Self {
            chain_id: cfg.chain_id_hex(),
            chain_name: cfg.chain_name.clone(),
            native_currency: CurrencyParams {
                name: cfg.native_currency.name.clone(),
                symbol: cfg.native_currency.symbol.clone(),
                decimals: cfg.native_currency.decimals,
            },
            rpc_urls: vec![cfg.rpc_url.clone()],
            block_explorer_urls: vec![cfg.explorer_url.clone()],
        }
    }
}
