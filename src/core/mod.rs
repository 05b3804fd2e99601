//! Types shared by the adapter and its callers.

pub mod events;

/// Provider tag reported in every [`events::ConnectionResult`] unless configured otherwise.
pub const DEFAULT_PROVIDER: &str = "privy";
