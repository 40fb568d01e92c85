// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod provider;
pub mod wallet;
pub mod client;
pub mod store;
pub mod ledger;

pub use client::{AnchorPhase, AnchorReceipt, ChainAnchorClient, PendingAnchor};
pub use config::{AnchorConfig, NetworkConfig, NodeConfig};
pub use errors::{AnchorError, AnchorResult, ConfigError, ProviderError};
pub use ledger::{AnchorOutcome, DecisionLedger};
pub use provider::{JsonRpcProvider, Provider};
pub use store::{DecisionRecord, MemoryStore};
pub use wallet::{Wallet, WalletEvent, WalletState};
