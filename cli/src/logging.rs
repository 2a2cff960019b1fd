#![deny(missing_docs)]

//! # Logging
//!
//! Diagnostics go to stderr so stdout carries nothing but the RAML document.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global `tracing` subscriber.
///
/// `verbose` raises the default filter to `debug`; `RUST_LOG` still wins when set.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Keep an already installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
