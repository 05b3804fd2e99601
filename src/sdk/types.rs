//! Values exchanged with the SDK.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Sms,
    Apple,
    Google,
}

impl LoginMethod {
    pub const ALL: &'static [LoginMethod] = &[Self::Email, Self::Sms, Self::Apple, Self::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::Email => "email",
            LoginMethod::Sms => "sms",
            LoginMethod::Apple => "apple",
            LoginMethod::Google => "google",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Some(LoginMethod::Email),
            "sms" | "phone" => Some(LoginMethod::Sms),
            "apple" => Some(LoginMethod::Apple),
            "google" => Some(LoginMethod::Google),
            _ => None,
        }
    }
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryMethod {
    UserPasscode,
    GoogleDrive,
    Icloud,
}

impl RecoveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryMethod::UserPasscode => "user-passcode",
            RecoveryMethod::GoogleDrive => "google-drive",
            RecoveryMethod::Icloud => "icloud",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user-passcode" | "passcode" => Some(RecoveryMethod::UserPasscode),
            "google-drive" | "gdrive" => Some(RecoveryMethod::GoogleDrive),
            "icloud" => Some(RecoveryMethod::Icloud),
            _ => None,
        }
    }
}

impl fmt::Display for RecoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Authenticated user as seen by the SDK. Only the id is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self { Self { id: id.into() } }
}

/// Branding passed through to the SDK's login sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub methods: Vec<LoginMethod>,
    pub appearance: Appearance,
}

/// Login completed; `user` is `None` when no session was established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Option<Session>,
}

pub struct RecoveryRequest {
    pub method: RecoveryMethod,
    pub credential: Zeroizing<String>,
}

impl RecoveryRequest {
    pub fn new(method: RecoveryMethod, credential: impl Into<String>) -> Self {
        Self { method, credential: Zeroizing::new(credential.into()) }
    }
}

impl fmt::Debug for RecoveryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryRequest")
            .field("method", &self.method)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletStatus {
    Created,
    NotCreated,
    NeedsRecovery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub public_key: String,
}

/// Opaque provider object; its presence is what the probe checks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderHandle {
    pub id: String,
}
