//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, writing to stderr so stdout stays
/// reserved for CSV output. Level comes from `RUST_LOG`, default `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
