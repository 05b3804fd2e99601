//! MemorySdk - in-process embedded-wallet simulator.
//!
//! Behaves like a hosted embedded-wallet SDK closely enough to drive the
//! adapter end to end: login sets a session, create derives a deterministic
//! base58 address from the user id, recovery checks a passcode. Every
//! primitive can be told to fail, and call counters are exposed so callers
//! can assert on what the adapter actually invoked.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::{
    EmbeddedWallet, EmbeddedWalletSdk, LoginRequest, LoginResponse, ProviderHandle,
    RecoveryRequest, Session, WalletRecord, WalletStatus,
};
use crate::error::{ProbeError, SdkError};

#[derive(Debug)]
struct State {
    ready: bool,
    user: Option<Session>,
    /// Id handed out by the next successful login. `None` means login
    /// completes without a session.
    login_as: Option<String>,
    status: WalletStatus,
    wallets: Vec<WalletRecord>,
    passcode: Option<String>,
    /// Provider answers but the wallet list reads empty, whatever the status.
    hide_wallets: bool,
    login_error: Option<SdkError>,
    logout_error: Option<SdkError>,
    create_error: Option<SdkError>,
    probe_error: Option<ProbeError>,
    create_delay: Duration,
    login_calls: usize,
    create_calls: usize,
    recover_calls: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            ready: true,
            user: None,
            login_as: Some("did:memory:user".into()),
            status: WalletStatus::NotCreated,
            wallets: Vec::new(),
            passcode: None,
            hide_wallets: false,
            login_error: None,
            logout_error: None,
            create_error: None,
            probe_error: None,
            create_delay: Duration::ZERO,
            login_calls: 0,
            create_calls: 0,
            recover_calls: 0,
        }
    }
}

/// Simulated SDK. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemorySdk {
    state: Arc<Mutex<State>>,
}

/// Wallet handle view over the same shared state.
struct MemoryWallet {
    state: Arc<Mutex<State>>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Deterministic base58 address for the `index`-th wallet of `user`.
pub(crate) fn derive_address(user: &str, index: usize) -> String {
    let digest = Sha256::digest(format!("{user}:{index}").as_bytes());
    bs58::encode(digest).into_string()
}

impl MemorySdk {
    pub fn new() -> Self { Self::default() }

    // Builders
    pub fn with_session(self, id: impl Into<String>) -> Self { lock(&self.state).user = Some(Session::new(id)); self }
    pub fn login_as(self, id: impl Into<String>) -> Self { lock(&self.state).login_as = Some(id.into()); self }
    pub fn login_without_session(self) -> Self { lock(&self.state).login_as = None; self }
    pub fn with_ready(self, ready: bool) -> Self { lock(&self.state).ready = ready; self }
    pub fn with_passcode(self, passcode: impl Into<String>) -> Self { lock(&self.state).passcode = Some(passcode.into()); self }
    pub fn with_create_delay(self, delay: Duration) -> Self { lock(&self.state).create_delay = delay; self }

    /// Existing wallet: status `Created` with one record derived from the session id.
    pub fn with_existing_wallet(self) -> Self {
        {
            let mut s = lock(&self.state);
            let owner = s.user.as_ref().map(|u| u.id.clone()).unwrap_or_default();
            s.status = WalletStatus::Created;
            s.wallets = vec![WalletRecord { public_key: derive_address(&owner, 0) }];
        }
        self
    }

    /// Wallet exists on the SDK side but key material must be recovered on this device.
    pub fn with_wallet_needing_recovery(self) -> Self {
        {
            let mut s = lock(&self.state);
            s.status = WalletStatus::NeedsRecovery;
            s.wallets.clear();
        }
        self
    }

    /// Provider probe succeeds but no wallet record is ever listed.
    pub fn with_provider_without_wallets(self) -> Self { lock(&self.state).hide_wallets = true; self }

    pub fn with_wallets(self, status: WalletStatus, keys: &[&str]) -> Self {
        {
            let mut s = lock(&self.state);
            s.status = status;
            s.wallets = keys.iter().map(|k| WalletRecord { public_key: (*k).to_string() }).collect();
        }
        self
    }

    // Fault injection
    pub fn fail_login(&self, err: SdkError) { lock(&self.state).login_error = Some(err); }
    pub fn fail_logout(&self, err: SdkError) { lock(&self.state).logout_error = Some(err); }
    pub fn fail_create(&self, err: SdkError) { lock(&self.state).create_error = Some(err); }
    pub fn fail_probe(&self, err: Option<ProbeError>) { lock(&self.state).probe_error = err; }
    pub fn set_ready(&self, ready: bool) { lock(&self.state).ready = ready; }

    // Counters
    pub fn login_calls(&self) -> usize { lock(&self.state).login_calls }
    pub fn create_calls(&self) -> usize { lock(&self.state).create_calls }
    pub fn recover_calls(&self) -> usize { lock(&self.state).recover_calls }

    pub fn wallet_status(&self) -> WalletStatus { lock(&self.state).status }
}

#[async_trait]
impl EmbeddedWalletSdk for MemorySdk {
    fn user(&self) -> Option<Session> { lock(&self.state).user.clone() }
    fn is_ready(&self) -> bool { lock(&self.state).ready }

    fn wallet(&self) -> Option<Arc<dyn EmbeddedWallet>> {
        if lock(&self.state).user.is_none() { return None; }
        Some(Arc::new(MemoryWallet { state: self.state.clone() }))
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, SdkError> {
        let mut s = lock(&self.state);
        s.login_calls += 1;
        if let Some(err) = s.login_error.clone() { return Err(err); }
        if request.methods.is_empty() {
            return Err(SdkError::coded("invalid_request", "No login methods supplied"));
        }
        s.user = s.login_as.clone().map(Session::new);
        Ok(LoginResponse { user: s.user.clone() })
    }

    async fn logout(&self) -> Result<(), SdkError> {
        let mut s = lock(&self.state);
        if let Some(err) = s.logout_error.clone() { return Err(err); }
        s.user = None;
        Ok(())
    }

    async fn recover(&self, request: RecoveryRequest) -> Result<(), SdkError> {
        let mut s = lock(&self.state);
        s.recover_calls += 1;
        if s.status != WalletStatus::NeedsRecovery {
            return Err(SdkError::coded("not_recoverable", "Wallet does not need recovery"));
        }
        if let Some(expected) = &s.passcode {
            if expected.as_str() != request.credential.as_str() {
                return Err(SdkError::coded("invalid_credential", "Invalid recovery credential"));
            }
        }
        let owner = s.user.as_ref().map(|u| u.id.clone()).unwrap_or_default();
        s.status = WalletStatus::Created;
        if s.wallets.is_empty() {
            s.wallets.push(WalletRecord { public_key: derive_address(&owner, 0) });
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddedWallet for MemoryWallet {
    fn status(&self) -> WalletStatus { lock(&self.state).status }
    fn wallets(&self) -> Vec<WalletRecord> {
        let s = lock(&self.state);
        if s.hide_wallets { Vec::new() } else { s.wallets.clone() }
    }

    async fn provider(&self) -> Result<ProviderHandle, ProbeError> {
        let s = lock(&self.state);
        if let Some(err) = s.probe_error.clone() { return Err(err); }
        if !s.ready || (s.status != WalletStatus::Created && !s.hide_wallets) { return Err(ProbeError::NotReady); }
        let owner = s.user.as_ref().map(|u| u.id.as_str()).unwrap_or("anonymous");
        Ok(ProviderHandle { id: format!("memory:{owner}") })
    }

    async fn create(&self) -> Result<(), SdkError> {
        let delay = {
            let mut s = lock(&self.state);
            s.create_calls += 1;
            s.create_delay
        };
        if !delay.is_zero() { tokio::time::sleep(delay).await; }

        let mut s = lock(&self.state);
        if let Some(err) = s.create_error.clone() { return Err(err); }
        let owner = s.user.as_ref().map(|u| u.id.clone())
            .ok_or_else(|| SdkError::coded("not_authenticated", "User must be logged in to create a wallet"))?;
        let index = s.wallets.len();
        s.wallets.push(WalletRecord { public_key: derive_address(&owner, index) });
        s.status = WalletStatus::Created;
        Ok(())
    }
}
