//! Logging and tracing utilities
//!
//! Stdout is reserved for the newsletter itself, so every subscriber set up
//! here writes to stderr.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "warn,newsletter=info,mag7_newsletter=info";

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() {
    init_tracing_with_filter(DEFAULT_FILTER);
}

/// Initialize tracing, falling back to `default_filter` when `RUST_LOG` is unset
pub fn init_tracing_with_filter(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
