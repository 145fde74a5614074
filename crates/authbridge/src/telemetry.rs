//! Logging setup for binaries embedding the bridge.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! the host's call. This helper gives hosts and the demo the standard
//! formatting with `RUST_LOG` filtering.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with `directive` used when `RUST_LOG` is unset or invalid.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_with_default(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
