// ABOUTME: Tracing subscriber setup for binaries and tests embedding the profiler.
// ABOUTME: RUST_LOG wins over the configured default filter.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// Returns `false` when a subscriber was already installed, which makes it
/// safe to call from every test.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
