//! Embedded-wallet SDK capability contract.
//!
//! The adapter never reaches into the SDK directly; it talks to these two
//! traits. A real integration implements them over the vendor SDK, tests and
//! the demo binary use [`MemorySdk`].
//!
//! ```text
//! EmbeddedWalletSdk (session side)
//!     │
//!     ├── user / is_ready           → reactive reads
//!     ├── login / logout / recover  → async, may fail with SdkError
//!     │
//!     └── wallet() → EmbeddedWallet (per-user handle)
//!                        │
//!                        ├── status / wallets     → reactive reads
//!                        ├── provider()           → probe, may fail with ProbeError
//!                        └── create()             → async, may fail with SdkError
//! ```

#[cfg(feature = "memory")]
mod memory;
mod types;

#[cfg(feature = "memory")]
pub use memory::MemorySdk;
pub use types::{
    Appearance, LoginMethod, LoginRequest, LoginResponse, ProviderHandle, RecoveryMethod,
    RecoveryRequest, Session, WalletRecord, WalletStatus,
};

use crate::error::{ProbeError, SdkError};
use async_trait::async_trait;
use std::sync::Arc;

/// Session side of the SDK: identity, readiness, and the lifecycle primitives.
#[async_trait]
pub trait EmbeddedWalletSdk: Send + Sync {
    fn user(&self) -> Option<Session>;
    fn is_ready(&self) -> bool;
    /// Current wallet handle, if the SDK has produced one for this user.
    fn wallet(&self) -> Option<Arc<dyn EmbeddedWallet>>;

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, SdkError>;
    async fn logout(&self) -> Result<(), SdkError>;
    async fn recover(&self, request: RecoveryRequest) -> Result<(), SdkError>;
}

/// Per-user embedded wallet handle.
#[async_trait]
pub trait EmbeddedWallet: Send + Sync {
    fn status(&self) -> WalletStatus;
    /// Connected wallet records; the first one is canonical.
    fn wallets(&self) -> Vec<WalletRecord>;

    async fn provider(&self) -> Result<ProviderHandle, ProbeError>;
    async fn create(&self) -> Result<(), SdkError>;
}
