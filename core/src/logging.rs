//! Tracing setup for binaries and tests embedding the store.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter from `RUST_LOG`, or a crate-level default per build profile.
pub fn env_filter() -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else if cfg!(debug_assertions) {
        EnvFilter::new("simpledb_core=debug")
    } else {
        EnvFilter::new("simpledb_core=info")
    }
}

/// Install a compact stderr subscriber. Safe to call more than once.
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
