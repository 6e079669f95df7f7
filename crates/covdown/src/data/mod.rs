//! Coverage Data
//!
//! In-memory statement coverage for a set of measured files, independent of
//! the tool that produced it. Two input formats are understood:
//!
//! - coverage.py JSON (`coverage json`), see [`CoverageData::from_coverage_json`]
//! - LCOV tracefiles, see [`CoverageData::from_lcov`]
//!
//! Report generation only talks to the [`CoverageSource`] trait, so test
//! runners holding coverage in some other shape can plug in directly.

mod json;
mod lcov;

use crate::result::{CovdownError, CovdownResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Access to per-file coverage, as needed by the report generator
pub trait CoverageSource {
    /// Paths of all measured files
    fn measured_files(&self) -> Vec<PathBuf>;

    /// Executed and missing statements of one measured file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unknown or its data cannot be analysed
    fn analysis(&self, path: &Path) -> CovdownResult<FileAnalysis>;

    /// Raw text lines of one measured file
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read
    fn source_lines(&self, path: &Path) -> CovdownResult<Vec<String>>;
}

/// Statement coverage of a single file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Statement lines that ran at least once
    pub executed: BTreeSet<u32>,
    /// Statement lines that never ran
    pub missing: BTreeSet<u32>,
}

impl FileAnalysis {
    /// Create an analysis from executed and missing line numbers
    #[must_use]
    pub fn new(
        executed: impl IntoIterator<Item = u32>,
        missing: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            executed: executed.into_iter().collect(),
            missing: missing.into_iter().collect(),
        }
    }

    /// Record an execution count for a statement line.
    ///
    /// A line seen executed anywhere is never reported missing.
    pub fn record(&mut self, line: u32, count: u64) {
        if count > 0 {
            self.executed.insert(line);
            self.missing.remove(&line);
        } else if !self.executed.contains(&line) {
            self.missing.insert(line);
        }
    }

    /// Fold another analysis of the same file into this one
    pub fn merge(&mut self, other: Self) {
        self.executed.extend(other.executed);
        self.missing.extend(other.missing);
        let executed = &self.executed;
        self.missing.retain(|line| !executed.contains(line));
    }

    /// Number of distinct statements (executed or missing)
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.executed.union(&self.missing).count()
    }

    /// Number of missing statements
    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.missing.len()
    }

    /// True when at least one statement never ran
    #[must_use]
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Check whether a 1-based line is a missing statement
    #[must_use]
    pub fn is_missing(&self, line: usize) -> bool {
        u32::try_from(line).is_ok_and(|line| self.missing.contains(&line))
    }
}

/// Input format of a coverage data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataFormat {
    /// Decide from the file extension and content
    #[default]
    Auto,
    /// coverage.py JSON report
    Json,
    /// LCOV tracefile
    Lcov,
}

impl DataFormat {
    /// Resolve `Auto` for a concrete file
    #[must_use]
    pub fn detect(self, path: &Path, content: &str) -> Self {
        if self != Self::Auto {
            return self;
        }

        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "info" | "lcov"));

        let first_record = content.trim_start();
        if by_extension || first_record.starts_with("TN:") || first_record.starts_with("SF:") {
            Self::Lcov
        } else {
            Self::Json
        }
    }
}

/// Coverage of every measured file, keyed and ordered by path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageData {
    files: BTreeMap<PathBuf, FileAnalysis>,
    /// Directory relative source paths are read from
    root: PathBuf,
}

impl CoverageData {
    /// Create empty coverage data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory relative source paths are resolved against
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Directory relative source paths are resolved against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add coverage for a file, merging with any existing entry
    pub fn insert(&mut self, path: impl Into<PathBuf>, analysis: FileAnalysis) {
        let path = path.into();
        match self.files.get_mut(&path) {
            Some(existing) => existing.merge(analysis),
            None => {
                let _ = self.files.insert(path, analysis);
            }
        }
    }

    /// Coverage of one file
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&FileAnalysis> {
        self.files.get(path)
    }

    /// Iterate files in path order
    pub fn files(&self) -> impl Iterator<Item = (&Path, &FileAnalysis)> {
        self.files.iter().map(|(path, analysis)| (path.as_path(), analysis))
    }

    /// Number of measured files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no file was measured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Location of a measured file on disk
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Load coverage data from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path, format: DataFormat) -> CovdownResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let format = format.detect(path, &content);
        debug!(path = %path.display(), ?format, "loading coverage data");

        match format {
            DataFormat::Lcov => Self::from_lcov(&content),
            DataFormat::Json | DataFormat::Auto => Self::from_coverage_json(&content),
        }
    }
}

impl CoverageSource for CoverageData {
    fn measured_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    fn analysis(&self, path: &Path) -> CovdownResult<FileAnalysis> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CovdownError::unknown_file(path))
    }

    fn source_lines(&self, path: &Path) -> CovdownResult<Vec<String>> {
        read_source_lines(&self.resolve(path))
    }
}

/// Read a source file into lines, without line terminators
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8
pub fn read_source_lines(path: &Path) -> CovdownResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(String::from).collect())
}
