//! coverage.py JSON Reader
//!
//! Reads the report written by `coverage json`:
//!
//! ```text
//! {
//!   "meta": { ... },
//!   "files": {
//!     "pkg/module.py": {
//!       "executed_lines": [1, 2, 4],
//!       "missing_lines": [3],
//!       "excluded_lines": [],
//!       "summary": { ... }
//!     }
//!   },
//!   "totals": { ... }
//! }
//! ```
//!
//! Keys other than `executed_lines` and `missing_lines` are ignored. Some
//! producers emit the line lists as comma-separated strings; those are
//! accepted too.

use super::{CoverageData, FileAnalysis};
use crate::result::CovdownResult;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CoverageJson {
    #[serde(default)]
    files: BTreeMap<String, FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    #[serde(default)]
    executed_lines: LineList,
    #[serde(default)]
    missing_lines: LineList,
}

/// A list of line numbers as an array or a comma-separated string
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum LineList {
    Numbers(Vec<u32>),
    Text(String),
    #[default]
    Absent,
}

impl LineList {
    fn into_lines(self, file: &str, field: &str) -> BTreeSet<u32> {
        match self {
            Self::Numbers(numbers) => numbers.into_iter().collect(),
            Self::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::parse::<u32>)
                .collect::<Result<BTreeSet<u32>, _>>()
                .unwrap_or_else(|err| {
                    warn!(file, field, %err, "unexpected line list, treating as empty");
                    BTreeSet::new()
                }),
            Self::Absent => BTreeSet::new(),
        }
    }
}

impl CoverageData {
    /// Parse a coverage.py JSON report
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON of the expected shape
    pub fn from_coverage_json(input: &str) -> CovdownResult<Self> {
        let report: CoverageJson = serde_json::from_str(input)?;
        let mut data = Self::new();

        for (path, entry) in report.files {
            let analysis = FileAnalysis {
                executed: entry.executed_lines.into_lines(&path, "executed_lines"),
                missing: entry.missing_lines.into_lines(&path, "missing_lines"),
            };
            data.insert(path, analysis);
        }

        debug!(files = data.len(), "parsed coverage.py JSON report");
        Ok(data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::CovdownError;
    use std::path::Path;

    const REPORT: &str = r#"{
        "meta": {"version": "7.4.0", "branch_coverage": false},
        "files": {
            "pkg/core.py": {
                "executed_lines": [1, 2, 4],
                "missing_lines": [3, 5],
                "excluded_lines": [],
                "summary": {"covered_lines": 3, "num_statements": 5}
            },
            "pkg/__init__.py": {
                "executed_lines": [1],
                "missing_lines": []
            }
        },
        "totals": {"covered_lines": 4}
    }"#;

    #[test]
    fn test_parses_files() {
        let data = CoverageData::from_coverage_json(REPORT).unwrap();
        assert_eq!(data.len(), 2);
        let core = data.get(Path::new("pkg/core.py")).unwrap();
        assert_eq!(core.statement_count(), 5);
        assert_eq!(core.missing, BTreeSet::from([3, 5]));
    }

    #[test]
    fn test_comma_separated_lists() {
        let input = r#"{"files": {"a.py": {"executed_lines": "1, 2,4", "missing_lines": "3"}}}"#;
        let data = CoverageData::from_coverage_json(input).unwrap();
        let a = data.get(Path::new("a.py")).unwrap();
        assert_eq!(a.executed, BTreeSet::from([1, 2, 4]));
        assert_eq!(a.missing, BTreeSet::from([3]));
    }

    #[test]
    fn test_unparseable_string_treated_as_empty() {
        let input = r#"{"files": {"a.py": {"executed_lines": "one, two", "missing_lines": [7]}}}"#;
        let data = CoverageData::from_coverage_json(input).unwrap();
        let a = data.get(Path::new("a.py")).unwrap();
        assert!(a.executed.is_empty());
        assert_eq!(a.statement_count(), 1);
    }

    #[test]
    fn test_absent_lists_default_to_empty() {
        let input = r#"{"files": {"a.py": {"missing_lines": null}}}"#;
        let data = CoverageData::from_coverage_json(input).unwrap();
        assert_eq!(data.get(Path::new("a.py")).unwrap().statement_count(), 0);
    }

    #[test]
    fn test_no_files_key() {
        let data = CoverageData::from_coverage_json(r#"{"meta": {}}"#).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = CoverageData::from_coverage_json("not json").unwrap_err();
        assert!(matches!(err, CovdownError::Json(_)));
    }
}
