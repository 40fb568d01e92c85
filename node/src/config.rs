// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::str::FromStr;
use std::time::Duration;

use attest_kernel::types::address::Address;
use attest_kernel::TxHash;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Target chain and registry contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_url: String,
    pub explorer_url: String,
    /// Zero address means the registry has not been deployed yet.
    pub contract_address: Address,
}

impl NetworkConfig {
    /// Chain id in the `0x`-prefixed form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn is_contract_deployed(&self) -> bool {
        !self.contract_address.is_zero()
    }

    pub fn explorer_tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    pub fn explorer_address_url(&self, address: &Address) -> String {
        format!("{}/account/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: 8082,
            chain_name: "Shardeum Sphinx 1.X".to_string(),
            native_currency: NativeCurrency {
                name: "SHM".to_string(),
                symbol: "SHM".to_string(),
                decimals: 18,
            },
            rpc_url: "https://sphinx.shardeum.org/".to_string(),
            explorer_url: "https://explorer-sphinx.shardeum.org/".to_string(),
            contract_address: Address::ZERO,
        }
    }
}

/// Submission and receipt polling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorConfig {
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub gas_limit: u64,
    /// Fabricate a transaction hash instead of failing when the contract is
    /// undeployed. Versions anchored this way are marked simulated.
    pub simulate_when_undeployed: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 60,
            gas_limit: 0x50000,
            simulate_when_undeployed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    pub network: NetworkConfig,
    pub anchor: AnchorConfig,
}

impl NodeConfig {
    /// Defaults overridden by `ATTEST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = NodeConfig::default();

        if let Some(url) = lookup("ATTEST_RPC_URL") {
            cfg.network.rpc_url = url;
        }
        if let Some(addr) = lookup("ATTEST_CONTRACT_ADDRESS") {
            cfg.network.contract_address = parse("ATTEST_CONTRACT_ADDRESS", &addr)?;
        }
        if let Some(id) = lookup("ATTEST_CHAIN_ID") {
            cfg.network.chain_id = parse_chain_id(&id)?;
        }
        if let Some(ms) = lookup("ATTEST_POLL_INTERVAL_MS") {
            cfg.anchor.poll_interval = Duration::from_millis(parse("ATTEST_POLL_INTERVAL_MS", &ms)?);
        }
        if let Some(n) = lookup("ATTEST_POLL_ATTEMPTS") {
            cfg.anchor.max_poll_attempts = parse("ATTEST_POLL_ATTEMPTS", &n)?;
        }
        if let Some(flag) = lookup("ATTEST_SIMULATE") {
            cfg.anchor.simulate_when_undeployed = parse_flag("ATTEST_SIMULATE", &flag)?;
        }

        Ok(cfg)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_chain_id(value: &str) -> Result<u64, ConfigError> {
    let v = value.trim();
    match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| ConfigError::InvalidValue {
            key: "ATTEST_CHAIN_ID",
            value: value.to_string(),
        }),
        None => parse("ATTEST_CHAIN_ID", v),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: value.to_string() }),
    }
}
