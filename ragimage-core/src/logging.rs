//! Tracing subscriber setup shared by every front end.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber once.
///
/// `quiet` disables all output; full-screen front ends use it so log lines do
/// not land on top of the alternate screen.
pub fn init_tracing(quiet: bool) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
