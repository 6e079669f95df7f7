//! LCOV Tracefile Parser
//!
//! Reads the line records of LCOV tracefiles produced by `grcov`,
//! `cargo llvm-cov`, `geninfo` and friends.
//!
//! ## LCOV Format
//!
//! ```text
//! TN:<test name>
//! SF:<source file>
//! FN:<line>,<function name>
//! FNDA:<execution count>,<function name>
//! DA:<line>,<execution count>[,<checksum>]
//! LF:<lines found>
//! LH:<lines hit>
//! end_of_record
//! ```
//!
//! Only `SF`, `DA` and `end_of_record` matter here; function and branch
//! records are skipped. A file listed under several test names is merged.

use super::{CoverageData, FileAnalysis};
use crate::result::{CovdownError, CovdownResult};
use std::path::PathBuf;
use tracing::debug;

impl CoverageData {
    /// Parse an LCOV tracefile
    ///
    /// # Errors
    ///
    /// Returns a parse error for a `DA` record that is malformed or appears
    /// outside an `SF` block
    pub fn from_lcov(input: &str) -> CovdownResult<Self> {
        let mut data = Self::new();
        let mut current: Option<(PathBuf, FileAnalysis)> = None;

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();

            if line == "end_of_record" {
                if let Some((path, analysis)) = current.take() {
                    data.insert(path, analysis);
                }
                continue;
            }

            let Some((tag, value)) = line.split_once(':') else {
                continue;
            };

            match tag {
                "SF" => {
                    let next = (PathBuf::from(value.trim()), FileAnalysis::default());
                    if let Some((path, analysis)) = current.replace(next) {
                        data.insert(path, analysis);
                    }
                }
                "DA" => {
                    let Some((_, analysis)) = current.as_mut() else {
                        return Err(CovdownError::parse(
                            index + 1,
                            "DA record outside of an SF block",
                        ));
                    };
                    let (number, count) = parse_line_record(value).ok_or_else(|| {
                        CovdownError::parse(index + 1, format!("invalid DA record '{value}'"))
                    })?;
                    analysis.record(number, count);
                }
                _ => {}
            }
        }

        // Tolerate a missing trailing end_of_record
        if let Some((path, analysis)) = current.take() {
            data.insert(path, analysis);
        }

        debug!(files = data.len(), "parsed LCOV tracefile");
        Ok(data)
    }
}

/// Parse `<line>,<count>[,<checksum>]`
fn parse_line_record(value: &str) -> Option<(u32, u64)> {
    let mut fields = value.split(',');
    let number = fields.next()?.trim().parse().ok()?;
    let count = fields.next()?.trim().parse().ok()?;
    Some((number, count))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    const TRACEFILE: &str = "\
TN:unit
SF:src/game.rs
FN:10,main
FNDA:1,main
DA:10,10
DA:15,5
DA:20,0
LF:3
LH:2
end_of_record
SF:src/player.rs
DA:5,3
DA:10,0
DA:11,0
end_of_record
";

    #[test]
    fn test_parses_all_source_files() {
        let data = CoverageData::from_lcov(TRACEFILE).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_line_hit_counts() {
        let data = CoverageData::from_lcov(TRACEFILE).unwrap();
        let game = data.get(Path::new("src/game.rs")).unwrap();
        assert_eq!(game.executed, BTreeSet::from([10, 15]));
        assert_eq!(game.missing, BTreeSet::from([20]));
    }

    #[test]
    fn test_checksum_field_ignored() {
        let data = CoverageData::from_lcov("SF:a.c\nDA:3,0,abc123\nend_of_record\n").unwrap();
        assert!(data.get(Path::new("a.c")).unwrap().is_missing(3));
    }

    #[test]
    fn test_repeated_file_is_merged() {
        let input = "\
TN:first
SF:lib.rs
DA:1,0
DA:2,0
end_of_record
TN:second
SF:lib.rs
DA:1,4
end_of_record
";
        let data = CoverageData::from_lcov(input).unwrap();
        let lib = data.get(Path::new("lib.rs")).unwrap();
        assert_eq!(lib.missing, BTreeSet::from([2]));
        assert_eq!(lib.executed, BTreeSet::from([1]));
    }

    #[test]
    fn test_missing_end_of_record_tolerated() {
        let data = CoverageData::from_lcov("SF:x.rs\nDA:1,0\n").unwrap();
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_invalid_da_record() {
        let err = CoverageData::from_lcov("SF:x.rs\nDA:one,1\n").unwrap_err();
        match err {
            CovdownError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_da_without_source_file() {
        let err = CoverageData::from_lcov("DA:1,1\n").unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn test_empty_input() {
        assert!(CoverageData::from_lcov("").unwrap().is_empty());
    }
}
