// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wallet session state and change notifications.
//!
//! The composing application observes account and chain changes from the
//! wallet and pushes them in with [`Wallet::notify`]. Anything interested in
//! those changes holds a receiver from [`Wallet::subscribe`].

use std::sync::Arc;

use attest_kernel::types::address::Address;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use crate::config::NetworkConfig;
use crate::errors::{AnchorError, AnchorResult};
use crate::provider::{ChainParams, Provider};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    Disconnected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletState {
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

#[derive(Clone)]
pub struct Wallet {
    provider: Arc<dyn Provider>,
    network: NetworkConfig,
    state: Arc<RwLock<WalletState>>,
    events: broadcast::Sender<WalletEvent>,
}

impl Wallet {
    pub fn new(provider: Arc<dyn Provider>, network: NetworkConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            provider,
            network,
            state: Arc::new(RwLock::new(WalletState::default())),
            events,
        }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Requests account access and moves the wallet onto the target network.
    pub async fn connect(&self) -> AnchorResult<Address> {
        let accounts = self.provider.request_accounts().await?;
        let address = *accounts.first().ok_or(AnchorError::NoWalletConnected)?;

        self.ensure_network().await?;
        let chain_id = self.provider.chain_id().await?;

        let mut state = self.state.write().await;
        state.address = Some(address);
        state.chain_id = Some(chain_id);
        tracing::info!(%address, chain_id, "wallet connected");
        Ok(address)
    }

    /// Switches to the configured chain, registering it first if the wallet
    /// has never seen it.
    pub async fn ensure_network(&self) -> AnchorResult<()> {
        match self.provider.switch_chain(self.network.chain_id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => {
                tracing::info!(chain = %self.network.chain_name, "adding network to wallet");
                self.provider.add_chain(&ChainParams::from(&self.network)).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// First authorized account, refreshed from the provider.
    pub async fn signer(&self) -> AnchorResult<Address> {
        let accounts = self.provider.accounts().await?;
        let address = accounts.first().copied();
        self.state.write().await.address = address;
        address.ok_or(AnchorError::NoWalletConnected)
    }

    pub async fn state(&self) -> WalletState {
        self.state.read().await.clone()
    }

    pub async fn sign_message(&self, message: &str) -> AnchorResult<String> {
        let address = self.signer().await?;
        Ok(self.provider.sign_message(&address, message).await?)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }

    /// Applies an observed wallet change and forwards it to subscribers.
    pub async fn notify(&self, event: WalletEvent) {
        {
            let mut state = self.state.write().await;
            match &event {
                WalletEvent::AccountsChanged(accounts) => state.address = accounts.first().copied(),
                WalletEvent::ChainChanged(id) => state.chain_id = Some(*id),
                WalletEvent::Disconnected => *state = WalletState::default(),
            }
        }
        tracing::debug!(?event, "wallet event");
        // No receivers is fine
        let _ = self.events.send(event);
    }
}
