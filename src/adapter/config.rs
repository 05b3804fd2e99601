//! Adapter configuration - built by the embedding app or read from the environment.

use crate::core::DEFAULT_PROVIDER;
use crate::sdk::{Appearance, LoginMethod};

pub const ENV_PROVIDER: &str = "WALLETLINK_PROVIDER";
pub const ENV_LOGO: &str = "WALLETLINK_LOGO";
pub const ENV_LOGIN_METHOD: &str = "WALLETLINK_LOGIN_METHOD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Tag this adapter answers to in `monitor_connection` and reports in results.
    pub provider: String,
    pub appearance: Appearance,
    pub default_login_method: LoginMethod,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.into(),
            appearance: Appearance::default(),
            default_login_method: LoginMethod::default(),
        }
    }
}

impl AdapterConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_provider(mut self, tag: impl Into<String>) -> Self { self.provider = tag.into(); self }
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self { self.appearance.logo = logo.into(); self }
    pub fn with_default_login_method(mut self, method: LoginMethod) -> Self { self.default_login_method = method; self }

    /// Defaults overridden by `WALLETLINK_*` variables. Blank or unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(tag) = env_value(ENV_PROVIDER) {
            config.provider = tag;
        }
        if let Some(logo) = env_value(ENV_LOGO) {
            config.appearance.logo = logo;
        }
        match env_value(ENV_LOGIN_METHOD).as_deref().map(LoginMethod::from_str) {
            Some(Some(method)) => config.default_login_method = method,
            Some(None) => tracing::warn!(key = ENV_LOGIN_METHOD, "unknown login method, using {}", config.default_login_method),
            None => {}
        }
        config
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
