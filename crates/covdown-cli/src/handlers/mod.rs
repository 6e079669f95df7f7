//! Command handlers, kept out of main.rs so they can be tested directly

pub mod report;
pub mod summary;

pub use report::{
    describe_source, execute_report, load_source, print_outcome, resolve_root, validate_language,
};
pub use summary::{execute_summary, render_table, summary_rows};
