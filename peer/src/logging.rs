use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber, honoring `RUST_LOG` and
/// defaulting to `info` when unset.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
