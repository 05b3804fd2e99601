//! Errors surfaced by the embedded-wallet SDK.
//!
//! None of these escape the adapter's public operations; they are logged and
//! folded into [`StatusEvent`](crate::StatusEvent)s.

use thiserror::Error;

/// Error returned by an SDK primitive (login, logout, create, recover).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error("{0}")]
    Message(String),
    #[error("{message} ({code})")]
    Coded { code: String, message: String },
    #[error("unknown error")]
    Unknown,
}

impl SdkError {
    pub fn message(msg: impl Into<String>) -> Self { Self::Message(msg.into()) }

    pub fn coded(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Coded { code: code.into(), message: msg.into() }
    }

    /// Human-readable text, if the SDK supplied any.
    pub fn text(&self) -> Option<&str> {
        match self {
            SdkError::Message(m) | SdkError::Coded { message: m, .. } if !m.is_empty() => Some(m.as_str()),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            SdkError::Coded { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

/// Why the provider probe produced no provider.
///
/// `NotReady` is the expected state while the SDK is still warming up;
/// the other two variants mean something is actually wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("wallet handle exposes no provider accessor")]
    Unsupported,
    #[error("provider not ready")]
    NotReady,
    #[error("provider probe failed: {0}")]
    Failed(#[from] SdkError),
}
