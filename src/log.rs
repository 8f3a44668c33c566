//! Logging initialization for the `policy` binary

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on debug output for
/// this crate and everything else stays off.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "budget_policy=debug,policy=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
