//! Report command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::ReportArgs;
use covdown::{terminal_summary, CovdownResult, CoverageData, DataFormat, ReportConfig, SummaryOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Execute the report command
///
/// Without `--cov-markdown` nothing is generated. A missing data file or a
/// failed report is printed but does not fail the command.
pub fn execute_report(config: &CliConfig, args: &ReportArgs) -> CliResult<()> {
    let Some(output) = args.cov_markdown.as_deref() else {
        debug!("--cov-markdown not given, markdown report disabled");
        return Ok(());
    };

    validate_language(&args.language)?;
    let root = resolve_root(&args.root)?;
    let report_config = ReportConfig::new()
        .with_source_root(&root)
        .with_fence_language(&args.language);

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let outcome = match load_source(&args.data, args.format.into(), &root) {
        Ok(source) => {
            if let Some(data) = source.as_ref().filter(|_| config.verbosity.is_verbose()) {
                reporter.info(&describe_source(data));
            }
            terminal_summary(Some(output), source.as_ref(), &report_config)
        }
        Err(err) => SummaryOutcome::Failed(err.to_string()),
    };

    print_outcome(&reporter, &outcome);
    Ok(())
}

/// Load coverage data, or `None` when the data file does not exist
pub fn load_source(
    data: &Path,
    format: DataFormat,
    root: &Path,
) -> CovdownResult<Option<CoverageData>> {
    if !data.exists() {
        warn!(data = %data.display(), "coverage data file not found");
        return Ok(None);
    }

    Ok(Some(CoverageData::load(data, format)?.with_root(root)))
}

/// One-line description of the loaded coverage data
#[must_use]
pub fn describe_source(data: &CoverageData) -> String {
    let (with_missing, missing) = data
        .files()
        .filter(|(_, analysis)| analysis.has_missing())
        .fold((0_usize, 0_usize), |(files, lines), (_, analysis)| {
            (files + 1, lines + analysis.miss_count())
        });

    format!(
        "Loaded coverage for {} measured files, {with_missing} with missing lines \
         ({missing} missing statements)",
        data.len()
    )
}

/// Make the project root absolute so measured paths can be shown relative
/// to it
pub fn resolve_root(root: &Path) -> CliResult<PathBuf> {
    if !root.is_dir() {
        return Err(CliError::invalid_argument(format!(
            "project root {} is not a directory",
            root.display()
        )));
    }

    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}

/// Reject fence languages that would break the markdown structure
pub fn validate_language(language: &str) -> CliResult<()> {
    if language.contains('`') || language.contains('\n') {
        return Err(CliError::invalid_argument(format!(
            "code fence language '{}' may not contain backticks or newlines",
            language.escape_debug()
        )));
    }
    Ok(())
}

/// Show the outcome of report generation
pub fn print_outcome(reporter: &Reporter, outcome: &SummaryOutcome) {
    let Some(message) = outcome.message() else {
        return;
    };

    match outcome {
        SummaryOutcome::Created(_) => reporter.success(&message),
        SummaryOutcome::SourceUnavailable => reporter.warning(&message),
        SummaryOutcome::Failed(_) => reporter.failure(&message),
        SummaryOutcome::Disabled => {}
    }
}
