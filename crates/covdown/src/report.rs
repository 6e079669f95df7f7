//! Markdown Coverage Report
//!
//! Renders statement coverage as a markdown document:
//!
//! ```text
//! # Coverage Report
//!
//! ## Summary
//!
//! | Name | Stmts | Miss | Cover | Missing |
//! |------|-------|------|-------|---------|
//! | pkg/core.py | 5 | 2 | 60% | 3, 5 |
//! | **TOTAL** | **5** | **2** | **60%** | |
//!
//! ## Detailed Code Sections with Missing Coverage
//!
//! ### pkg/core.py
//!
//! (one fenced block per excerpt window, missing lines marked)
//! ```
//!
//! Only files with at least one missing statement appear, in path order.

use crate::data::{CoverageSource, FileAnalysis};
use crate::excerpt::excerpt_windows;
use crate::ranges::format_missing_lines;
use crate::result::CovdownResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marker placed after the line number of a missing statement.
///
/// A single wide glyph that fills two terminal columns, the same width as
/// [`COVERED_MARKER`], so source text stays aligned.
pub const MISSING_MARKER: &str = "❌";

/// Marker placed after the line number of any other line
pub const COVERED_MARKER: &str = "  ";

/// Explicit settings for report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the displayed file paths are made relative to
    pub source_root: PathBuf,
    /// Info string of the fenced code blocks
    pub fence_language: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            fence_language: "python".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory displayed paths are relative to
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Set the code fence language
    #[must_use]
    pub fn with_fence_language(mut self, language: impl Into<String>) -> Self {
        self.fence_language = language.into();
        self
    }

    /// Path as shown in the report
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Coverage percentage, 100 when there are no statements
#[must_use]
pub fn coverage_percent(statements: usize, missed: usize) -> f64 {
    if statements == 0 {
        return 100.0;
    }
    100.0 - (missed as f64 * 100.0 / statements as f64)
}

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Path of the measured file
    pub path: PathBuf,
    /// Executed and missing statements
    pub analysis: FileAnalysis,
}

impl FileSummary {
    /// Number of statements
    #[must_use]
    pub fn statements(&self) -> usize {
        self.analysis.statement_count()
    }

    /// Number of missing statements
    #[must_use]
    pub fn missed(&self) -> usize {
        self.analysis.miss_count()
    }

    /// Coverage percentage of the file
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        coverage_percent(self.statements(), self.missed())
    }

    /// Compact missing-line ranges
    #[must_use]
    pub fn missing_ranges(&self) -> String {
        format_missing_lines(self.analysis.missing.iter().copied())
    }
}

/// Statement totals over the reported files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Total statements
    pub statements: usize,
    /// Total missing statements
    pub missed: usize,
}

impl ReportTotals {
    /// Sum the rows of the summary table
    #[must_use]
    pub fn from_files(files: &[FileSummary]) -> Self {
        files.iter().fold(Self::default(), |acc, file| Self {
            statements: acc.statements + file.statements(),
            missed: acc.missed + file.missed(),
        })
    }

    /// Overall coverage percentage
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        coverage_percent(self.statements, self.missed)
    }
}

/// Markdown report generator over a coverage source
#[derive(Debug)]
pub struct MarkdownReport<'a, S: CoverageSource + ?Sized> {
    source: &'a S,
    config: ReportConfig,
}

impl<'a, S: CoverageSource + ?Sized> MarkdownReport<'a, S> {
    /// Create a generator with the default configuration
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            config: ReportConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Files with missing coverage, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if any measured file cannot be analysed
    pub fn collect(&self) -> CovdownResult<Vec<FileSummary>> {
        let mut files = Vec::new();

        for path in self.source.measured_files() {
            let analysis = self.source.analysis(&path)?;
            debug!(
                path = %path.display(),
                statements = analysis.statement_count(),
                missed = analysis.miss_count(),
                "analysed measured file"
            );
            if analysis.has_missing() {
                files.push(FileSummary { path, analysis });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Render the full markdown document
    ///
    /// # Errors
    ///
    /// Returns an error if any measured file cannot be analysed. Unreadable
    /// source files are reported inline instead.
    pub fn render(&self) -> CovdownResult<String> {
        let files = self.collect()?;

        let mut output = String::from("# Coverage Report\n\n");
        self.write_summary(&mut output, &files);
        self.write_details(&mut output, &files);

        Ok(output)
    }

    /// Render the report and write it to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written
    pub fn save(&self, path: &Path) -> CovdownResult<()> {
        let content = self.render()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn write_summary(&self, output: &mut String, files: &[FileSummary]) {
        output.push_str("## Summary\n\n");
        output.push_str("| Name | Stmts | Miss | Cover | Missing |\n");
        output.push_str("|------|-------|------|-------|---------|\n");

        for file in files {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {:.0}% | {} |",
                self.config.display_path(&file.path),
                file.statements(),
                file.missed(),
                file.coverage_percent(),
                file.missing_ranges()
            );
        }

        let totals = ReportTotals::from_files(files);
        let _ = writeln!(
            output,
            "| **TOTAL** | **{}** | **{}** | **{:.0}%** | |\n",
            totals.statements,
            totals.missed,
            totals.coverage_percent()
        );
    }

    fn write_details(&self, output: &mut String, files: &[FileSummary]) {
        output.push_str("## Detailed Code Sections with Missing Coverage\n\n");

        for file in files {
            let _ = writeln!(output, "### {}\n", self.config.display_path(&file.path));

            match self.source.source_lines(&file.path) {
                Ok(lines) => self.write_excerpts(output, file, &lines),
                Err(err) => {
                    warn!(path = %file.path.display(), %err, "could not read source file");
                    let _ = writeln!(output, "*Error reading file: {err}*\n");
                }
            }
        }
    }

    fn write_excerpts(&self, output: &mut String, file: &FileSummary, lines: &[String]) {
        for window in excerpt_windows(lines, file.analysis.missing.iter().copied()) {
            let _ = writeln!(output, "```{}", self.config.fence_language);
            for index in window.indices() {
                let Some(text) = lines.get(index) else {
                    break;
                };
                let number = index + 1;
                let marker = if file.analysis.is_missing(number) {
                    MISSING_MARKER
                } else {
                    COVERED_MARKER
                };
                let _ = writeln!(output, "{number:4}{marker} {text}");
            }
            output.push_str("```\n\n");
        }
    }
}
