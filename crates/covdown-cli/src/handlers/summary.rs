//! Summary command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::report::resolve_root;
use crate::output::style_percent;
use crate::SummaryArgs;
use covdown::{CoverageData, FileSummary, ReportConfig, ReportTotals};
use std::fmt::Write;

/// Execute the summary command
///
/// # Errors
///
/// Returns an error if the root is not a directory or the coverage data
/// cannot be loaded
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let root = resolve_root(&args.root)?;
    let data = CoverageData::load(&args.data, args.format.into())?.with_root(&root);
    let report_config = ReportConfig::new().with_source_root(&root);

    let rows = summary_rows(&data, args.skip_covered);
    print!(
        "{}",
        render_table(&rows, &report_config, config.color.should_color())
    );
    Ok(())
}

/// Rows of the terminal table, in path order
#[must_use]
pub fn summary_rows(data: &CoverageData, skip_covered: bool) -> Vec<FileSummary> {
    data.files()
        .filter(|(_, analysis)| !skip_covered || analysis.has_missing())
        .map(|(path, analysis)| FileSummary {
            path: path.to_path_buf(),
            analysis: analysis.clone(),
        })
        .collect()
}

/// Render a fixed-width table with a total line
#[must_use]
pub fn render_table(rows: &[FileSummary], config: &ReportConfig, use_color: bool) -> String {
    let names: Vec<String> = rows.iter().map(|row| config.display_path(&row.path)).collect();
    let width = names
        .iter()
        .map(|name| name.chars().count())
        .chain(["Name".len(), "TOTAL".len()])
        .max()
        .unwrap_or(5);
    let rule = "-".repeat(width + 32);

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<width$} {:>7} {:>6} {:>6}   Missing",
        "Name", "Stmts", "Miss", "Cover"
    );
    let _ = writeln!(output, "{rule}");

    for (name, row) in names.iter().zip(rows) {
        let percent = row.coverage_percent();
        let cover = style_percent(percent, &format!("{percent:>5.0}%"), use_color);
        let _ = write!(
            output,
            "{name:<width$} {:>7} {:>6} {cover}",
            row.statements(),
            row.missed()
        );
        let missing = row.missing_ranges();
        if missing.is_empty() {
            output.push('\n');
        } else {
            let _ = writeln!(output, "   {missing}");
        }
    }

    let totals = ReportTotals::from_files(rows);
    let percent = totals.coverage_percent();
    let cover = style_percent(percent, &format!("{percent:>5.0}%"), use_color);
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(
        output,
        "{:<width$} {:>7} {:>6} {cover}",
        "TOTAL", totals.statements, totals.missed
    );
    output
}
