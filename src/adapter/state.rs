//! Connection state of a wallet handle, computed once per check.

use crate::error::ProbeError;
use crate::sdk::{EmbeddedWallet, WalletStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Provider absent and the handle is neither recoverable nor creatable (yet).
    Unconnected,
    NeedsRecovery,
    NotCreated,
    /// Provider present with at least one wallet; carries the canonical address.
    Connected(String),
}

impl ConnectionState {
    pub fn address(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected(address) => Some(address.as_str()),
            _ => None,
        }
    }
}

/// Probe the provider; `Some(address)` when it is up and a canonical wallet exists.
pub(crate) async fn probe_connected(wallet: &dyn EmbeddedWallet) -> Option<String> {
    match wallet.provider().await {
        Ok(handle) => {
            let first = wallet.wallets().into_iter().next().map(|w| w.public_key);
            if first.is_none() {
                tracing::debug!(provider = %handle.id, "provider up but no wallets listed");
            }
            first
        }
        Err(ProbeError::NotReady) => {
            tracing::debug!("provider not ready yet");
            None
        }
        Err(err) => {
            tracing::warn!("getProvider failed: {err}");
            None
        }
    }
}

pub(crate) async fn evaluate(wallet: &dyn EmbeddedWallet) -> ConnectionState {
    if let Some(address) = probe_connected(wallet).await {
        return ConnectionState::Connected(address);
    }
    match wallet.status() {
        WalletStatus::NeedsRecovery => ConnectionState::NeedsRecovery,
        WalletStatus::NotCreated => ConnectionState::NotCreated,
        WalletStatus::Created => ConnectionState::Unconnected,
    }
}
