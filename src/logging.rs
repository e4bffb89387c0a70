//! Log output setup.
//!
//! Lines look like `2026-10-18 10:00:00.123  INFO trainboard::db::repo: 42: Train added ...`
//! and go to stderr, leaving stdout to command output.

use tracing::Subscriber;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Build the process subscriber for the given filter directive.
///
/// An unparsable directive falls back to `info`. The caller decides how to install it.
pub fn subscriber(filter: &str) -> impl Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish()
}
