// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use attest_kernel::error::KernelError;
use attest_kernel::types::id::VersionNumber;
use attest_kernel::{DecisionId, TxHash};
use thiserror::Error;

/// RPC error code a wallet returns when asked to switch to a chain it has
/// never seen.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    pub fn code(&self) -> Option<i64> {
        match self {
            ProviderError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error("No wallet account connected")]
    NoWalletConnected,
    #[error("Registry contract is not deployed")]
    ContractNotDeployed,
    #[error("Provider request failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Transaction {0} reverted")]
    TxFailed(TxHash),
    #[error("Transaction {tx_hash} still pending after {attempts} receipt polls")]
    TxTimedOut { tx_hash: TxHash, attempts: u32 },
    #[error("Receipt polling cancelled for {0}")]
    Cancelled(TxHash),
    #[error("No receipt poll for {tx_hash} succeeded: {source}")]
    ReceiptUnavailable {
        tx_hash: TxHash,
        #[source]
        source: ProviderError,
    },
    #[error("Version {1} of decision {0} is already being anchored")]
    AnchorInProgress(DecisionId, VersionNumber),
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Decision {0} not found")]
    DecisionNotFound(DecisionId),
    #[error("Version {1} of decision {0} not found")]
    VersionNotFound(DecisionId, VersionNumber),
}

impl AnchorError {
    /// Outcome unknown: the transaction may still be mined.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            AnchorError::TxTimedOut { .. }
                | AnchorError::Cancelled(_)
                | AnchorError::ReceiptUnavailable { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

pub type AnchorResult<T> = Result<T, AnchorError>;
