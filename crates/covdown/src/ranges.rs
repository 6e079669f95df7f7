//! Compact Line Ranges
//!
//! Collapses a set of line numbers into the short form used in the
//! "Missing" column of the summary table:
//!
//! ```text
//! [1, 2, 3, 5, 6, 9]  →  "1-3, 5-6, 9"
//! ```
//!
//! At most [`MAX_RANGES`] ranges are rendered; anything beyond that is
//! replaced by a trailing `", ..."`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Number of ranges rendered before the list is truncated
pub const MAX_RANGES: usize = 10;

/// A closed run of consecutive line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line (1-based, inclusive)
    pub start: u32,
    /// Last line (1-based, inclusive)
    pub end: u32,
}

impl LineRange {
    /// Create a range covering `start..=end`
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range covering one line
    #[must_use]
    pub const fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    /// True when the range covers exactly one line
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.start == self.end
    }

    /// Check whether `line` falls inside the range
    #[must_use]
    pub const fn contains(self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Collapse line numbers into ascending runs of consecutive lines.
///
/// Input order does not matter and duplicates are ignored.
#[must_use]
pub fn compress_ranges<I>(lines: I) -> Vec<LineRange>
where
    I: IntoIterator<Item = u32>,
{
    let sorted: BTreeSet<u32> = lines.into_iter().collect();
    let mut ranges: Vec<LineRange> = Vec::new();

    for line in sorted {
        match ranges.last_mut() {
            Some(last) if last.end.checked_add(1) == Some(line) => last.end = line,
            _ => ranges.push(LineRange::single(line)),
        }
    }

    ranges
}

/// Format missing line numbers for the summary table.
///
/// Returns an empty string for no lines.
#[must_use]
pub fn format_missing_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = u32>,
{
    let ranges = compress_ranges(lines);

    let mut output = ranges
        .iter()
        .take(MAX_RANGES)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if ranges.len() > MAX_RANGES {
        output.push_str(", ...");
    }

    output
}
