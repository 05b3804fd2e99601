//! Status events and connection results emitted by the adapter.
//!
//! Events are structured so callers can branch on them; `Display` renders the
//! text a UI shows in its status line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sdk::LoginMethod;

/// Progress or outcome of an adapter operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    // login
    AlreadyLoggedIn { user_id: String },
    Connecting { provider: String, method: LoginMethod },
    LoggedIn { user_id: String },
    NoSession,
    LoginFailed { reason: String },
    // monitor
    Connected { address: String },
    NeedsRecovery,
    Created { address: String },
    CreateFailed { reason: String },
    // recovery
    Recovering,
    Recovered { address: String },
    RecoveryUnavailable,
    RecoveryFailed { reason: String },
    // logout
    LoggedOut,
    LogoutFailed { reason: String },
}

impl StatusEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            StatusEvent::NoSession
                | StatusEvent::LoginFailed { .. }
                | StatusEvent::CreateFailed { .. }
                | StatusEvent::RecoveryUnavailable
                | StatusEvent::RecoveryFailed { .. }
                | StatusEvent::LogoutFailed { .. }
        )
    }

    /// Address carried by the event, if it announces a usable wallet.
    pub fn address(&self) -> Option<&str> {
        match self {
            StatusEvent::Connected { address }
            | StatusEvent::Created { address }
            | StatusEvent::Recovered { address } => Some(address.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::AlreadyLoggedIn { user_id } => write!(f, "You are already logged in as {user_id}"),
            StatusEvent::Connecting { provider, method } => write!(f, "Connecting with {provider} via {method}..."),
            StatusEvent::LoggedIn { user_id } => write!(f, "Connected user: {user_id}"),
            StatusEvent::NoSession => f.write_str("Login attempt completed, but no user session was established."),
            StatusEvent::LoginFailed { reason } => write!(f, "Connection failed: {reason}"),
            StatusEvent::Connected { address } => write!(f, "Connected to existing wallet: {address}"),
            StatusEvent::NeedsRecovery => f.write_str("Wallet needs recovery"),
            StatusEvent::Created { address } => write!(f, "Created wallet: {address}"),
            StatusEvent::CreateFailed { reason } => write!(f, "Wallet creation failed: {reason}"),
            StatusEvent::Recovering => f.write_str("Recovering wallet..."),
            StatusEvent::Recovered { address } => write!(f, "Recovered wallet: {address}"),
            StatusEvent::RecoveryUnavailable => f.write_str("Wallet recovery failed: Provider not available"),
            StatusEvent::RecoveryFailed { reason } => write!(f, "Wallet recovery failed: {reason}"),
            StatusEvent::LoggedOut => f.write_str("Logged out successfully"),
            StatusEvent::LogoutFailed { reason } if reason.is_empty() => f.write_str("Logout failed"),
            StatusEvent::LogoutFailed { reason } => f.write_str(reason),
        }
    }
}

/// A wallet became usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionResult {
    pub provider: String,
    pub address: String,
}

/// Receives status events. Implemented for `()` (discard) and closures.
pub trait StatusSink: Send + Sync {
    fn status(&self, event: StatusEvent);
}

impl StatusSink for () {
    fn status(&self, _: StatusEvent) {}
}

impl<F: Fn(StatusEvent) + Send + Sync> StatusSink for F {
    fn status(&self, event: StatusEvent) { self(event) }
}

/// Receives connection and recovery results.
pub trait ConnectionSink: Send + Sync {
    fn connected(&self, result: ConnectionResult);
}

impl ConnectionSink for () {
    fn connected(&self, _: ConnectionResult) {}
}

impl<F: Fn(ConnectionResult) + Send + Sync> ConnectionSink for F {
    fn connected(&self, result: ConnectionResult) { self(result) }
}
