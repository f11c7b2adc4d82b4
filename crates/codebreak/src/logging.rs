//! Log output setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a global `fmt` subscriber on stderr, filtered by `RUST_LOG`
/// and defaulting to `info`.
///
/// Safe to call more than once. Returns `true` only for the call that
/// actually installed the subscriber; later calls (or a subscriber set
/// up elsewhere) leave the existing one in place.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
