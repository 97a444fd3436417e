//! Logging setup
//!
//! The library only emits `tracing` events. Hosts without their own
//! subscriber can install a compact terminal one here.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install a subscriber filtered by `RUST_LOG`, falling back to `warn`.
///
/// Safe to call more than once; only the first call has any effect.
///
/// - `RUST_LOG=fuzzy_searching=debug` logs timings of aggregate calls
/// - `RUST_LOG=fuzzy_searching=trace` logs every scored candidate
pub fn init_tracing() {
    init_tracing_with_filter("warn");
}

/// Like [`init_tracing`] with a custom fallback filter
pub fn init_tracing_with_filter(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        // Another subscriber may already be installed by the host
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
            .is_ok();

        if installed {
            debug!("Fuzzy search logging initialized");
        }
    });
}
