//! tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr.
///
/// An explicit `level` wins over `RUST_LOG`; with neither, only warnings and
/// errors are shown.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
