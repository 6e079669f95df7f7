//! covdown: markdown coverage reports
//!
//! ## Usage
//!
//! ```bash
//! covdown report --cov-markdown coverage.md   # Annotated markdown report
//! covdown summary                             # Terminal summary table
//! ```

use clap::Parser;
use covdown_cli::{
    handlers::{execute_report, execute_summary},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    if config.color != ColorChoice::Auto {
        let enabled = config.color.should_color();
        console::set_colors_enabled(enabled);
        console::set_colors_enabled_stderr(enabled);
    }
    logging::init(&config);

    match cli.command {
        Commands::Report(args) => execute_report(&config, &args),
        Commands::Summary(args) => execute_summary(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
