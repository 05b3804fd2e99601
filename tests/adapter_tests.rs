//! Adapter tests against the in-memory SDK
//!
//! 1. login: short-circuit, success, no session, SDK errors
//! 2. monitor_connection: guard, existing wallet, needs recovery, create (once)
//! 3. recover_wallet: success, bad credential, provider unavailable, empty wallet list
//! 4. logout

use std::sync::{Arc, Mutex};
use std::time::Duration;

use walletlink::{
    AdapterConfig, ConnectionResult, ConnectionSink, ConnectionState, LoginMethod, MemorySdk,
    ProbeError, RecoveryMethod, SdkError, StatusEvent, StatusSink, WalletConnectionAdapter,
    WalletStatus,
};

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<StatusEvent>>>,
    results: Arc<Mutex<Vec<ConnectionResult>>>,
}

impl Recorder {
    fn events(&self) -> Vec<StatusEvent> { self.events.lock().unwrap().clone() }
    fn results(&self) -> Vec<ConnectionResult> { self.results.lock().unwrap().clone() }
    fn lines(&self) -> Vec<String> { self.events().iter().map(|e| e.to_string()).collect() }
}

impl StatusSink for Recorder {
    fn status(&self, event: StatusEvent) { self.events.lock().unwrap().push(event); }
}

impl ConnectionSink for Recorder {
    fn connected(&self, result: ConnectionResult) { self.results.lock().unwrap().push(result); }
}

fn adapter(sdk: &MemorySdk) -> WalletConnectionAdapter {
    WalletConnectionAdapter::new(Arc::new(sdk.clone()))
}

async fn monitor(adapter: &WalletConnectionAdapter, rec: &Recorder) -> Option<ConnectionResult> {
    adapter.monitor_connection("privy", rec, rec).await
}

fn first_address(adapter: &WalletConnectionAdapter) -> String {
    adapter.wallet().expect("wallet handle").wallets()[0].public_key.clone()
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_reports_connecting_then_user() {
    let sdk = MemorySdk::new().login_as("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.login(LoginMethod::Email, &rec).await;

    assert_eq!(
        rec.events(),
        vec![
            StatusEvent::Connecting { provider: "privy".into(), method: LoginMethod::Email },
            StatusEvent::LoggedIn { user_id: "U1".into() },
        ]
    );
    assert_eq!(rec.lines(), vec!["Connecting with privy via email...", "Connected user: U1"]);
    assert_eq!(adapter.user().unwrap().id, "U1");
}

#[tokio::test]
async fn login_with_existing_session_skips_sdk() {
    let sdk = MemorySdk::new().with_session("U0");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.login(LoginMethod::Google, &rec).await;

    assert_eq!(rec.events(), vec![StatusEvent::AlreadyLoggedIn { user_id: "U0".into() }]);
    assert_eq!(sdk.login_calls(), 0);
}

#[tokio::test]
async fn login_error_resolves_with_reason() {
    let sdk = MemorySdk::new();
    sdk.fail_login(SdkError::coded("too_many_requests", "rate limited"));
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.login(LoginMethod::Sms, &rec).await;

    let lines = rec.lines();
    assert_eq!(lines.iter().filter(|l| l.contains("rate limited")).count(), 1);
    assert_eq!(rec.events().last(), Some(&StatusEvent::LoginFailed { reason: "rate limited".into() }));
    assert!(adapter.user().is_none());
}

#[tokio::test]
async fn login_unknown_error_uses_fallback_text() {
    let sdk = MemorySdk::new();
    sdk.fail_login(SdkError::Unknown);
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.login(LoginMethod::Apple, &rec).await;

    assert_eq!(rec.lines().last().unwrap(), "Connection failed: Unknown error during login");
}

#[tokio::test]
async fn login_without_session_is_soft_failure() {
    let sdk = MemorySdk::new().login_without_session();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.login_default(&rec).await;

    assert_eq!(
        rec.events(),
        vec![StatusEvent::Connecting { provider: "privy".into(), method: LoginMethod::Email }, StatusEvent::NoSession]
    );
    assert_eq!(sdk.login_calls(), 1);
}

// =============================================================================
// monitor_connection
// =============================================================================

#[tokio::test]
async fn monitor_foreign_provider_is_noop() {
    let sdk = MemorySdk::new().with_session("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    let result = adapter.monitor_connection("phantom", &rec, &rec).await;

    assert!(result.is_none());
    assert!(rec.events().is_empty());
    assert!(rec.results().is_empty());
    assert_eq!(sdk.create_calls(), 0);
}

#[tokio::test]
async fn monitor_requires_session_and_ready() {
    let sdk = MemorySdk::new().with_ready(false).with_session("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();
    assert!(monitor(&adapter, &rec).await.is_none());

    let anonymous = MemorySdk::new();
    let adapter2 = WalletConnectionAdapter::new(Arc::new(anonymous.clone()));
    assert!(monitor(&adapter2, &rec).await.is_none());

    assert!(rec.events().is_empty());
    assert_eq!(sdk.create_calls() + anonymous.create_calls(), 0);
}

#[tokio::test]
async fn monitor_existing_wallet_connects_first_record() {
    let sdk = MemorySdk::new().with_session("U1").with_wallets(WalletStatus::Created, &["ADDR1", "ADDR2"]);
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    let result = monitor(&adapter, &rec).await.expect("connected");

    assert_eq!(result, ConnectionResult { provider: "privy".into(), address: "ADDR1".into() });
    assert_eq!(rec.events(), vec![StatusEvent::Connected { address: "ADDR1".into() }]);
    assert_eq!(rec.results(), vec![result]);
    assert_eq!(sdk.create_calls(), 0);
}

#[tokio::test]
async fn monitor_probe_failure_with_needs_recovery() {
    let sdk = MemorySdk::new().with_session("U1").with_wallets(WalletStatus::NeedsRecovery, &["OLD"]);
    sdk.fail_probe(Some(ProbeError::Failed(SdkError::message("bridge closed"))));
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());

    assert_eq!(rec.events(), vec![StatusEvent::NeedsRecovery]);
    assert_eq!(rec.lines(), vec!["Wallet needs recovery"]);
    assert!(rec.results().is_empty());
    assert_eq!(sdk.create_calls(), 0);
    assert_eq!(sdk.recover_calls(), 0);
}

#[tokio::test]
async fn monitor_creates_wallet_when_not_created() {
    let sdk = MemorySdk::new().with_session("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    let result = monitor(&adapter, &rec).await.expect("created");
    let address = first_address(&adapter);

    assert_eq!(sdk.create_calls(), 1);
    assert_eq!(rec.events(), vec![StatusEvent::Created { address: address.clone() }]);
    assert_eq!(rec.results(), vec![ConnectionResult { provider: "privy".into(), address: address.clone() }]);
    assert_eq!(result.address, address);

    // Next pass finds the wallet through the provider instead of creating another.
    let again = monitor(&adapter, &rec).await.expect("connected");
    assert_eq!(again.address, address);
    assert_eq!(sdk.create_calls(), 1);
    assert_eq!(rec.events().last(), Some(&StatusEvent::Connected { address }));
}

#[tokio::test]
async fn monitor_create_failure_is_reported() {
    let sdk = MemorySdk::new().with_session("U1");
    sdk.fail_create(SdkError::coded("embedded_wallet_limit", "Wallet limit reached"));
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());

    assert_eq!(rec.events(), vec![StatusEvent::CreateFailed { reason: "Wallet limit reached".into() }]);
    assert!(rec.results().is_empty());
}

#[tokio::test]
async fn overlapping_monitor_passes_create_once() {
    let sdk = MemorySdk::new().with_session("U1").with_create_delay(Duration::from_millis(50));
    let adapter = Arc::new(adapter(&sdk));
    let rec = Recorder::default();

    let (a, b) = tokio::join!(monitor(&adapter, &rec), monitor(&adapter, &rec));

    assert_eq!(sdk.create_calls(), 1);
    assert_eq!(a.is_some() as usize + b.is_some() as usize, 1);
    let created = rec.events().iter().filter(|e| matches!(e, StatusEvent::Created { .. })).count();
    assert_eq!(created, 1);
    assert_eq!(rec.results().len(), 1);
}

#[tokio::test]
async fn overlapping_passes_across_tasks_create_once() {
    let sdk = MemorySdk::new().with_session("U1").with_create_delay(Duration::from_millis(50));
    let adapter = Arc::new(adapter(&sdk));
    let rec = Recorder::default();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let (adapter, rec) = (adapter.clone(), rec.clone());
            tokio::spawn(async move { adapter.monitor_connection("privy", &rec, &rec).await })
        })
        .collect();
    for h in handles {
        h.await.expect("join");
    }

    assert_eq!(sdk.create_calls(), 1);
    assert_eq!(sdk.wallet_status(), WalletStatus::Created);
    let created = rec.events().iter().filter(|e| matches!(e, StatusEvent::Created { .. })).count();
    assert_eq!(created, 1);
}

#[tokio::test]
async fn monitor_created_but_provider_down_is_silent() {
    let sdk = MemorySdk::new().with_session("U1").with_existing_wallet();
    sdk.fail_probe(Some(ProbeError::Unsupported));
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());
    assert!(rec.events().is_empty());
    assert_eq!(adapter.connection_state().await, Some(ConnectionState::Unconnected));
}

#[tokio::test]
async fn monitor_provider_up_without_wallets_is_silent() {
    let sdk = MemorySdk::new().with_session("U1").with_existing_wallet().with_provider_without_wallets();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());
    assert!(!rec.events().iter().any(|e| matches!(e, StatusEvent::Connected { .. })));
    assert!(rec.events().is_empty());
    assert!(rec.results().is_empty());
    assert_eq!(adapter.connection_state().await, Some(ConnectionState::Unconnected));
    assert_eq!(sdk.create_calls(), 0);
}

#[tokio::test]
async fn monitor_provider_up_without_wallets_falls_back_to_recovery() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery().with_provider_without_wallets();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());
    assert_eq!(rec.events(), vec![StatusEvent::NeedsRecovery]);
}

#[tokio::test]
async fn custom_provider_tag() {
    let sdk = MemorySdk::new().with_session("U1").with_existing_wallet();
    let adapter = WalletConnectionAdapter::with_config(
        Arc::new(sdk.clone()),
        AdapterConfig::new().with_provider("embedded"),
    );
    let rec = Recorder::default();

    assert!(adapter.monitor_connection("privy", &rec, &rec).await.is_none());
    let result = adapter.monitor_connection("embedded", &rec, &rec).await.expect("connected");
    assert_eq!(result.provider, "embedded");
}

#[tokio::test]
async fn login_announces_configured_provider() {
    let sdk = MemorySdk::new().login_as("U1");
    let adapter = WalletConnectionAdapter::with_config(
        Arc::new(sdk.clone()),
        AdapterConfig::new().with_provider("embedded"),
    );
    let rec = Recorder::default();

    adapter.login(LoginMethod::Sms, &rec).await;

    assert_eq!(
        rec.events()[0],
        StatusEvent::Connecting { provider: "embedded".into(), method: LoginMethod::Sms }
    );
    assert_eq!(rec.lines(), vec!["Connecting with embedded via sms...", "Connected user: U1"]);
}

#[tokio::test]
async fn connection_state_tracks_wallet() {
    let sdk = MemorySdk::new().with_session("U1");
    let adapter = adapter(&sdk);
    assert_eq!(adapter.connection_state().await, Some(ConnectionState::NotCreated));

    adapter.monitor_connection("privy", &(), &()).await;
    let address = first_address(&adapter);
    let state = adapter.connection_state().await.unwrap();
    assert_eq!(state.address(), Some(address.as_str()));

    let anonymous = WalletConnectionAdapter::new(Arc::new(MemorySdk::new()));
    assert_eq!(anonymous.connection_state().await, None);
}

// =============================================================================
// recover_wallet
// =============================================================================

#[tokio::test]
async fn recover_then_report_first_wallet() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery().with_passcode("1234");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    let result = adapter
        .recover_wallet(RecoveryMethod::UserPasscode, "1234", &rec, &rec)
        .await
        .expect("recovered");
    let address = first_address(&adapter);

    assert_eq!(result.address, address);
    assert_eq!(
        rec.events(),
        vec![StatusEvent::Recovering, StatusEvent::Recovered { address: address.clone() }]
    );
    assert_eq!(rec.results(), vec![ConnectionResult { provider: "privy".into(), address }]);
}

#[tokio::test]
async fn recover_with_bad_credential() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery().with_passcode("1234");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(adapter.recover_wallet(RecoveryMethod::UserPasscode, "9999", &rec, &rec).await.is_none());

    assert_eq!(
        rec.lines(),
        vec!["Recovering wallet...", "Wallet recovery failed: Invalid recovery credential"]
    );
    assert!(rec.results().is_empty());
    assert_eq!(sdk.wallet_status(), WalletStatus::NeedsRecovery);
}

#[tokio::test]
async fn recover_with_provider_unavailable() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery();
    sdk.fail_probe(Some(ProbeError::Failed(SdkError::message("bridge closed"))));
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(adapter.recover_wallet(RecoveryMethod::Icloud, "token", &rec, &rec).await.is_none());

    assert_eq!(rec.events(), vec![StatusEvent::Recovering, StatusEvent::RecoveryUnavailable]);
    assert!(rec.results().is_empty());
    assert_eq!(sdk.recover_calls(), 1);
}

#[tokio::test]
async fn recover_with_empty_wallet_list() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery().with_provider_without_wallets();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(adapter.recover_wallet(RecoveryMethod::UserPasscode, "any", &rec, &rec).await.is_none());

    assert_eq!(rec.events(), vec![StatusEvent::Recovering, StatusEvent::RecoveryUnavailable]);
    assert!(rec.results().is_empty());
    assert_eq!(sdk.wallet_status(), WalletStatus::Created);
}

#[tokio::test]
async fn recover_without_wallet_handle() {
    let sdk = MemorySdk::new().with_wallet_needing_recovery();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(adapter.recover_wallet(RecoveryMethod::GoogleDrive, "token", &rec, &rec).await.is_none());
    assert_eq!(rec.events().last(), Some(&StatusEvent::RecoveryUnavailable));
}

#[tokio::test]
async fn needs_recovery_then_recover_then_monitor() {
    let sdk = MemorySdk::new().with_session("U1").with_wallet_needing_recovery();
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    assert!(monitor(&adapter, &rec).await.is_none());
    let recovered = adapter.recover_wallet(RecoveryMethod::UserPasscode, "any", &rec, &rec).await.unwrap();
    let connected = monitor(&adapter, &rec).await.unwrap();

    assert_eq!(recovered.address, connected.address);
    assert_eq!(sdk.create_calls(), 0);
    assert_eq!(rec.results().len(), 2);
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_session() {
    let sdk = MemorySdk::new().with_session("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    adapter.logout(&rec).await;

    assert_eq!(rec.lines(), vec!["Logged out successfully"]);
    assert!(adapter.user().is_none());
}

#[tokio::test]
async fn logout_failure_uses_message_or_fallback() {
    let sdk = MemorySdk::new().with_session("U1");
    let adapter = adapter(&sdk);
    let rec = Recorder::default();

    sdk.fail_logout(SdkError::message("session store locked"));
    adapter.logout(&rec).await;
    sdk.fail_logout(SdkError::message(""));
    adapter.logout(&rec).await;

    assert_eq!(rec.lines(), vec!["session store locked", "Logout failed"]);
    assert!(adapter.user().is_some());
}
