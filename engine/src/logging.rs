//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber.
///
/// Respects the `RUST_LOG` environment variable for filtering and falls
/// back to `info`. Safe to call more than once (later calls are no-ops),
/// so tests and embedders can both use it freely.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
