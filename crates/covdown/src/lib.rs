//! covdown: Markdown Coverage Reports
//!
//! Turns statement coverage into a markdown document with a per-file summary
//! table and annotated source excerpts around every uncovered line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  coverage.json / lcov.info → CoverageData (CoverageSource)      │
//! │                                   ↓                             │
//! │                            MarkdownReport                       │
//! │                  ↓                                  ↓           │
//! │   format_missing_lines (summary)     excerpt_windows (details)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use covdown::{format_missing_lines, excerpt_windows, Window};
//!
//! assert_eq!(format_missing_lines([1, 2, 3, 5, 6, 9]), "1-3, 5-6, 9");
//!
//! let lines = ["l1", "l2", "l3", "l4", "l5"];
//! assert_eq!(excerpt_windows(&lines, [3]), vec![Window::new(0, 4)]);
//! ```

#![warn(missing_docs)]

pub mod data;
mod excerpt;
mod ranges;
pub mod report;
mod result;
pub mod summary;

pub use data::{read_source_lines, CoverageData, CoverageSource, DataFormat, FileAnalysis};
pub use excerpt::{excerpt_windows, Window, CONTEXT_LINES, MERGE_GAP};
pub use ranges::{compress_ranges, format_missing_lines, LineRange, MAX_RANGES};
pub use report::{
    coverage_percent, FileSummary, MarkdownReport, ReportConfig, ReportTotals, COVERED_MARKER,
    MISSING_MARKER,
};
pub use result::{CovdownError, CovdownResult};
pub use summary::{terminal_summary, SummaryOutcome, MESSAGE_PREFIX};
