//! Log subscriber setup
//!
//! Logs go to stderr; stdout is reserved for report JSON.

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins over `default_filter` when set. A second call keeps the
/// subscriber installed by the first.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = installed {
        debug!(error = %e, "log subscriber already installed");
    }
}
