//! Log subscriber setup for the binary. Library crates only emit events.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter from a directive string, falling back to
/// [`DEFAULT_LOG`](crate::config::DEFAULT_LOG) when it does not parse.
pub fn filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG))
}

/// Install a stderr fmt subscriber. Returns false when one was already set.
pub fn init_logging(directives: &str) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter(directives))
        .try_init()
        .is_ok()
}
