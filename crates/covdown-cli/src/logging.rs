//! Log output for the CLI.
//!
//! Library diagnostics are emitted through `tracing`; this installs the
//! stderr subscriber. `RUST_LOG` takes precedence over the `-v`/`-q` level.

use crate::config::CliConfig;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub fn default_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.verbosity.log_directive())
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(config.color.should_color())
        .with_writer(std::io::stderr)
        .try_init();
}
