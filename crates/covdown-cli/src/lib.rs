//! covdown CLI Library
//!
//! Command-line front end for the `covdown` markdown coverage reports.
//!
//! ```bash
//! covdown report --cov-markdown coverage.md   # Write the markdown report
//! covdown report --data lcov.info --cov-markdown coverage.md --language rust
//! covdown summary --skip-covered              # Terminal table
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, FormatArg, ReportArgs, SummaryArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{style_percent, Reporter};
