//! Structured logging with tracing.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact subscriber on stderr. `RUST_LOG` takes precedence over
/// `level`. Stdout stays reserved for the board and the final announcement.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
