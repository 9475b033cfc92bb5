//! Diagnostic logging
//!
//! Diagnostics go to stderr so they never mix with menu output on stdout.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Without `verbose`, `RUST_LOG` decides and falls back to `warn`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
