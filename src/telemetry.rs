//! Logging setup for binaries and tests embedding the handshake.
//!
//! The library only emits `tracing` events; nothing is printed unless the host
//! installs a subscriber, either its own or the one below.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a console subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` (e.g. `"info"` or `"vesta_handshake=debug"`).
///
/// Returns `false` if a global subscriber was already installed, so calling it
/// more than once is harmless.
pub fn init_tracing(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_ok()
}
