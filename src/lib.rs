//! walletlink: connect a UI to an embedded-wallet SDK.
//!
//! # Architecture
//!
//! ```text
//! UI layer
//!   │  login / monitor_connection / recover_wallet / logout
//!   ▼
//! WalletConnectionAdapter ──► StatusSink      (StatusEvent stream)
//!   │                    └──► ConnectionSink  (ConnectionResult)
//!   ▼
//! EmbeddedWalletSdk (trait) ── wallet() ──► EmbeddedWallet (trait)
//!   │
//!   └── MemorySdk (feature `memory`, simulated)
//! ```
//!
//! Operations never return errors. Every SDK failure is logged and turned
//! into a [`StatusEvent`]; guard failures in `monitor_connection` are silent.
//!
//! # Features
//!
//! - `memory` (default) - in-process simulated SDK and the `walletlink` binary
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use walletlink::{LoginMethod, MemorySdk, StatusEvent, WalletConnectionAdapter};
//!
//! let adapter = WalletConnectionAdapter::new(Arc::new(MemorySdk::new()));
//! let on_status = |e: StatusEvent| println!("{e}");
//! adapter.login(LoginMethod::Email, &on_status).await;
//! adapter.monitor_connection("privy", &on_status, &|r| println!("{}", r.address)).await;
//! ```

pub mod adapter;
pub mod core;
pub mod error;
pub mod logging;
pub mod sdk;

pub use adapter::{AdapterConfig, ConnectionState, WalletConnectionAdapter};
pub use core::events::{ConnectionResult, ConnectionSink, StatusEvent, StatusSink};
pub use core::DEFAULT_PROVIDER;
pub use error::{ProbeError, SdkError};
pub use sdk::{
    Appearance, EmbeddedWallet, EmbeddedWalletSdk, LoginMethod, LoginRequest, LoginResponse,
    ProviderHandle, RecoveryMethod, RecoveryRequest, Session, WalletRecord, WalletStatus,
};

#[cfg(feature = "memory")]
pub use sdk::MemorySdk;
