//! Report generation module.
//!
//! Renders a finished reconciliation for human review:
//! - `export` - CSV, markdown workbook, and JSON artifacts on disk
//! - `console` - overview, colored comparison rows, final summary
//!
//! Writers consume the outcome plus both raw indexes and summaries; the
//! reconciler itself never touches any of this.

mod console;
mod export;

pub use console::{print_comparison, print_overview, print_run_summary};
pub use export::{export_csv_report, export_json_report, export_workbook};
