//! Structured logging setup.
//!
//! The library itself only emits `tracing` events; embedding services decide
//! whether to install a subscriber. `init_logging` is the default choice.

use tracing_subscriber::EnvFilter;

/// Filter used when neither the caller nor `RUST_LOG` provide one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the filter for the subscriber.
///
/// Precedence: explicit `filter` argument, then `RUST_LOG`, then
/// [`DEFAULT_LOG_FILTER`]. An unparsable explicit filter falls back to the default.
pub fn build_filter(filter: Option<&str>) -> EnvFilter {
    match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

/// Installs a global `fmt` subscriber writing to stderr.
///
/// Returns `false` when a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init_logging(filter: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
