//! Logging setup for binaries and host apps embedding the adapter.

use tracing_subscriber::{fmt, EnvFilter};

/// Env var switching log output to JSON lines (`1` enables).
pub const ENV_LOG_JSON: &str = "WALLETLINK_LOG_JSON";

/// Filter used when `RUST_LOG` is unset or invalid: adapter events at info,
/// host and dependency noise at warn.
pub const DEFAULT_FILTER: &str = "warn,walletlink=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn json_requested() -> bool {
    std::env::var(ENV_LOG_JSON).map(|value| value == "1").unwrap_or(false)
}

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]. A no-op when a global subscriber is already set.
pub fn init_logging() {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    if json_requested() {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.compact().with_target(false).try_init();
    }
}
