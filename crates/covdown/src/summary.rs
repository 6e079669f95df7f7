//! End-of-run hook for test runners.
//!
//! A runner calls [`terminal_summary`] once the test session has finished.
//! Report generation is opt-in: without an output path nothing happens, and
//! no outcome is ever fatal to the run.

use crate::data::CoverageSource;
use crate::report::{MarkdownReport, ReportConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Prefix of every line written to the terminal
pub const MESSAGE_PREFIX: &str = "covdown";

/// What happened when the hook ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// No output path was requested
    Disabled,
    /// No coverage data was available
    SourceUnavailable,
    /// The report was written to the given path
    Created(PathBuf),
    /// Report construction failed with the given error
    Failed(String),
}

impl SummaryOutcome {
    /// Line to show in the terminal, if any
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::SourceUnavailable => Some(format!(
                "{MESSAGE_PREFIX}: coverage data not found, cannot generate report"
            )),
            Self::Created(path) => Some(format!(
                "{MESSAGE_PREFIX}: Created markdown with missing code coverage at {}",
                path.display()
            )),
            Self::Failed(err) => Some(format!(
                "{MESSAGE_PREFIX}: Error creating markdown from missing code coverage data: {err}"
            )),
        }
    }

    /// True when a report file was written
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Generate the markdown report at the end of a test run.
///
/// `output` is the opt-in report path; `source` is `None` when the runner
/// has no coverage integration.
pub fn terminal_summary<S>(
    output: Option<&Path>,
    source: Option<&S>,
    config: &ReportConfig,
) -> SummaryOutcome
where
    S: CoverageSource + ?Sized,
{
    let Some(output) = output else {
        return SummaryOutcome::Disabled;
    };

    let Some(source) = source else {
        warn!(output = %output.display(), "no coverage data, skipping markdown report");
        return SummaryOutcome::SourceUnavailable;
    };

    match MarkdownReport::new(source)
        .with_config(config.clone())
        .save(output)
    {
        Ok(()) => {
            info!(output = %output.display(), "markdown coverage report written");
            SummaryOutcome::Created(output.to_path_buf())
        }
        Err(err) => {
            error!(output = %output.display(), %err, "markdown coverage report failed");
            SummaryOutcome::Failed(err.to_string())
        }
    }
}
