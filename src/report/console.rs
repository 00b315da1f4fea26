//! Console rendering of a finished comparison.

use crate::types::{ComparisonRow, ReconcileOutcome, ReportSummary, StatusClass};
use crate::ui;

/// Print the run overview for both input files.
pub fn print_overview(summary_old: &ReportSummary, summary_new: &ReportSummary) {
    println!("=== Overview ===");
    for summary in [summary_old, summary_new] {
        println!(
            "{}: passed {}, failed {}, skipped {}, ignored {}, total {} ({} ms)",
            summary.file_name,
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.ignored,
            summary.total,
            summary.duration_ms
        );
        if summary.duplicate_names > 0 {
            println!("  {} duplicate test name(s), last occurrence kept", summary.duplicate_names);
        }
    }
    println!();
}

/// Print every comparison row, statuses colored by class.
pub fn print_comparison(rows: &[ComparisonRow]) {
    if rows.is_empty() {
        return;
    }
    println!("=== Mismatches ===");
    for row in rows {
        let name = if row.name_old.is_empty() { &row.name_new } else { &row.name_old };
        print!("  {}: ", name);
        print_side(&row.status_old);
        print!(" -> ");
        print_side(&row.status_new);
        println!();
    }
    println!();
}

fn print_side(status: &str) {
    if status.is_empty() {
        print!("absent");
    } else {
        ui::print_status(status, StatusClass::of(status));
    }
}

/// Print the final counts: status mismatches vs one-sided cases.
pub fn print_run_summary(outcome: &ReconcileOutcome) {
    println!("\n=== Summary ===");
    println!("Status mismatches:  {}", count_common(outcome));
    println!("Only in old report: {}", count_only_old(outcome));
    println!("Only in new report: {}", count_only_new(outcome));
    println!("Total:              {}", outcome.mismatches);
}

fn count_common(outcome: &ReconcileOutcome) -> usize {
    outcome.rows.iter().filter(|r| r.is_common()).count()
}

fn count_only_old(outcome: &ReconcileOutcome) -> usize {
    outcome.rows.iter().filter(|r| r.name_new.is_empty()).count()
}

fn count_only_new(outcome: &ReconcileOutcome) -> usize {
    outcome.rows.iter().filter(|r| r.name_old.is_empty()).count()
}
