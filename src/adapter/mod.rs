//! WalletConnectionAdapter - login, monitor, recover, logout over an embedded-wallet SDK.
//!
//! Every operation resolves; failures surface as [`StatusEvent`]s on the
//! caller's status sink and are logged through `tracing`. Nothing is retried:
//! the caller re-invokes an operation when it wants another attempt.
//!
//! # Operations
//!
//! | Operation | Events | Result sink |
//! |-----------|--------|-------------|
//! | `login` | AlreadyLoggedIn, or Connecting then LoggedIn / NoSession / LoginFailed | - |
//! | `monitor_connection` | none (guard), Connected, NeedsRecovery, Created / CreateFailed | once on Connected / Created |
//! | `recover_wallet` | Recovering then Recovered / RecoveryUnavailable / RecoveryFailed | once on Recovered |
//! | `logout` | LoggedOut / LogoutFailed | - |

mod config;
mod state;

pub use config::{AdapterConfig, ENV_LOGIN_METHOD, ENV_LOGO, ENV_PROVIDER};
pub use state::ConnectionState;

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::core::events::{ConnectionResult, ConnectionSink, StatusEvent, StatusSink};
use crate::error::SdkError;
use crate::sdk::{
    EmbeddedWallet, EmbeddedWalletSdk, LoginMethod, LoginRequest, RecoveryMethod,
    RecoveryRequest, Session, WalletStatus,
};

pub struct WalletConnectionAdapter {
    sdk: Arc<dyn EmbeddedWalletSdk>,
    config: AdapterConfig,
    /// Held for the duration of a `create()` call; overlapping monitor passes back off.
    create_guard: Mutex<()>,
}

impl WalletConnectionAdapter {
    pub fn new(sdk: Arc<dyn EmbeddedWalletSdk>) -> Self { Self::with_config(sdk, AdapterConfig::default()) }

    pub fn with_config(sdk: Arc<dyn EmbeddedWalletSdk>, config: AdapterConfig) -> Self {
        Self { sdk, config, create_guard: Mutex::new(()) }
    }

    pub fn config(&self) -> &AdapterConfig { &self.config }
    pub fn provider(&self) -> &str { &self.config.provider }

    // Reactive reads
    pub fn user(&self) -> Option<Session> { self.sdk.user() }
    pub fn is_ready(&self) -> bool { self.sdk.is_ready() }
    pub fn wallet(&self) -> Option<Arc<dyn EmbeddedWallet>> { self.sdk.wallet() }

    /// Current connection state, or `None` without a wallet handle.
    pub async fn connection_state(&self) -> Option<ConnectionState> {
        let wallet = self.sdk.wallet()?;
        Some(state::evaluate(wallet.as_ref()).await)
    }

    /// Log in with `method`. Short-circuits when a session already exists.
    pub async fn login(&self, method: LoginMethod, on_status: &dyn StatusSink) {
        debug!(method = method.as_str(), ready = self.sdk.is_ready(), "login requested");

        if let Some(user) = self.sdk.user() {
            debug!(user = %user.id, "session exists, skipping login");
            on_status.status(StatusEvent::AlreadyLoggedIn { user_id: user.id });
            return;
        }

        on_status.status(StatusEvent::Connecting { provider: self.config.provider.clone(), method });
        let request = LoginRequest { methods: vec![method], appearance: self.config.appearance.clone() };
        match self.sdk.login(request).await {
            Ok(response) => match response.user {
                Some(user) => {
                    info!(user = %user.id, "login successful");
                    on_status.status(StatusEvent::LoggedIn { user_id: user.id });
                }
                None => {
                    warn!("login completed without a user session");
                    on_status.status(StatusEvent::NoSession);
                }
            },
            Err(err) => {
                error!(code = err.code().unwrap_or("-"), "login failed: {err}");
                let reason = failure_text(&err, "Unknown error during login");
                on_status.status(StatusEvent::LoginFailed { reason });
            }
        }
    }

    /// Login with the configured default method.
    pub async fn login_default(&self, on_status: &dyn StatusSink) {
        self.login(self.config.default_login_method, on_status).await
    }

    /// Check the wallet for `selected_provider` and connect it if possible.
    ///
    /// Safe to call on every state change: returns immediately, emitting
    /// nothing, unless the provider tag matches, a session exists, the SDK is
    /// ready, and a wallet handle is available. Never starts recovery.
    pub async fn monitor_connection(
        &self,
        selected_provider: &str,
        on_status: &dyn StatusSink,
        on_connected: &dyn ConnectionSink,
    ) -> Option<ConnectionResult> {
        if selected_provider != self.config.provider || self.sdk.user().is_none() || !self.sdk.is_ready() {
            return None;
        }
        let wallet = self.sdk.wallet()?;

        match state::evaluate(wallet.as_ref()).await {
            ConnectionState::Connected(address) => {
                on_status.status(StatusEvent::Connected { address: address.clone() });
                Some(self.emit_result(address, on_connected))
            }
            ConnectionState::NeedsRecovery => {
                on_status.status(StatusEvent::NeedsRecovery);
                None
            }
            ConnectionState::NotCreated => self.create_wallet(wallet.as_ref(), on_status, on_connected).await,
            ConnectionState::Unconnected => {
                debug!("wallet created but provider unavailable; nothing to do");
                None
            }
        }
    }

    async fn create_wallet(
        &self,
        wallet: &dyn EmbeddedWallet,
        on_status: &dyn StatusSink,
        on_connected: &dyn ConnectionSink,
    ) -> Option<ConnectionResult> {
        let Ok(_guard) = self.create_guard.try_lock() else {
            debug!("wallet creation already in flight");
            return None;
        };
        // Another pass may have finished creating between evaluate() and the guard.
        if wallet.status() != WalletStatus::NotCreated {
            debug!("wallet no longer pending creation");
            return None;
        }

        if let Err(err) = wallet.create().await {
            error!(code = err.code().unwrap_or("-"), "wallet creation failed: {err}");
            let reason = failure_text(&err, "Unknown error during wallet creation");
            on_status.status(StatusEvent::CreateFailed { reason });
            return None;
        }

        let Some(record) = wallet.wallets().into_iter().next() else {
            error!("create() succeeded but no wallet is listed");
            on_status.status(StatusEvent::CreateFailed { reason: "No wallet available after creation".into() });
            return None;
        };
        info!(address = %record.public_key, "wallet created");
        on_status.status(StatusEvent::Created { address: record.public_key.clone() });
        Some(self.emit_result(record.public_key, on_connected))
    }

    /// Recover an embedded wallet with `credential`, then report the canonical address.
    pub async fn recover_wallet(
        &self,
        method: RecoveryMethod,
        credential: &str,
        on_status: &dyn StatusSink,
        on_recovered: &dyn ConnectionSink,
    ) -> Option<ConnectionResult> {
        on_status.status(StatusEvent::Recovering);

        if let Err(err) = self.sdk.recover(RecoveryRequest::new(method, credential)).await {
            error!(method = method.as_str(), code = err.code().unwrap_or("-"), "wallet recovery failed: {err}");
            let reason = failure_text(&err, "Unknown error during recovery");
            on_status.status(StatusEvent::RecoveryFailed { reason });
            return None;
        }

        let address = match self.sdk.wallet() {
            Some(wallet) => state::probe_connected(wallet.as_ref()).await,
            None => None,
        };
        match address {
            Some(address) => {
                info!(%address, "wallet recovered");
                on_status.status(StatusEvent::Recovered { address: address.clone() });
                Some(self.emit_result(address, on_recovered))
            }
            None => {
                warn!("recovery completed but provider not available");
                on_status.status(StatusEvent::RecoveryUnavailable);
                None
            }
        }
    }

    pub async fn logout(&self, on_status: &dyn StatusSink) {
        match self.sdk.logout().await {
            Ok(()) => {
                info!("logged out");
                on_status.status(StatusEvent::LoggedOut);
            }
            Err(err) => {
                warn!("logout failed: {err}");
                on_status.status(StatusEvent::LogoutFailed { reason: err.text().unwrap_or_default().to_string() });
            }
        }
    }

    fn emit_result(&self, address: String, sink: &dyn ConnectionSink) -> ConnectionResult {
        let result = ConnectionResult { provider: self.config.provider.clone(), address };
        sink.connected(result.clone());
        result
    }
}

fn failure_text(err: &SdkError, fallback: &str) -> String {
    err.text().unwrap_or(fallback).to_string()
}
