//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use covdown::DataFormat;
use std::path::PathBuf;

/// covdown: markdown coverage reports with annotated excerpts of uncovered lines
#[derive(Parser, Debug)]
#[command(name = "covdown")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the markdown coverage report after a test run
    Report(ReportArgs),

    /// Print the coverage summary table to the terminal
    Summary(SummaryArgs),
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Coverage data file (coverage.py JSON or LCOV)
    #[arg(short, long, default_value = "coverage.json")]
    pub data: PathBuf,

    /// Coverage data format
    #[arg(long, default_value = "auto")]
    pub format: FormatArg,

    /// Create markdown coverage report at the given path
    #[arg(long = "cov-markdown", value_name = "PATH")]
    pub cov_markdown: Option<PathBuf>,

    /// Project root: relative source paths are read from here and shown
    /// relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Language tag of the fenced code blocks
    #[arg(long, default_value = "python")]
    pub language: String,
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Coverage data file (coverage.py JSON or LCOV)
    #[arg(short, long, default_value = "coverage.json")]
    pub data: PathBuf,

    /// Coverage data format
    #[arg(long, default_value = "auto")]
    pub format: FormatArg,

    /// Project root displayed paths are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Hide fully covered files
    #[arg(long)]
    pub skip_covered: bool,
}

/// Coverage data format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Detect from extension and content
    #[default]
    Auto,
    /// coverage.py JSON report
    Json,
    /// LCOV tracefile
    Lcov,
}

impl From<FormatArg> for DataFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => Self::Auto,
            FormatArg::Json => Self::Json,
            FormatArg::Lcov => Self::Lcov,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
