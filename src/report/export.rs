//! Artifact export: comparison CSV, markdown workbook, JSON report.
//!
//! The CSV is the primary artifact for downstream tooling. The workbook
//! mirrors a reviewer's reading order: run overview, every test from each
//! input file with a status icon, then the comparison rows.

use crate::types::{
    ComparisonRow, ReconcileOutcome, ReportIndex, ReportSummary, StatusClass,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// CSV column order, fixed for downstream tooling.
const CSV_HEADER: &str = "test_case_file1,test_case_file_2,status_file1,status_file2,description_file1,description_file2";

/// Write the comparison rows as CSV.
pub fn export_csv_report(rows: &[ComparisonRow], output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    writeln!(file, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            csv_field(&row.name_old),
            csv_field(&row.name_new),
            csv_field(&row.status_old),
            csv_field(&row.status_new),
            csv_field(&row.description_old),
            csv_field(&row.description_new)
        )?;
    }
    Ok(())
}

/// Quote a field when it contains a comma, quote, or line break (RFC 4180).
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Export the full run as JSON: run identity, both summaries, the
/// mismatch count, and every comparison row.
pub fn export_json_report(
    outcome: &ReconcileOutcome,
    summary_old: &ReportSummary,
    summary_new: &ReportSummary,
    run_id: &str,
    output_path: &Path,
) -> std::io::Result<()> {
    use serde_json::json;

    let report = json!({
        "run_id": run_id,
        "file_old": summary_old.file_name,
        "file_new": summary_new.file_name,
        "summaries": [summary_old, summary_new],
        "mismatches": outcome.mismatches,
        "rows": outcome.rows,
    });

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &report)?;

    Ok(())
}

/// Export the review workbook as markdown.
///
/// Sections: Overview (one line per input file), one section per input
/// file listing every test with a three-way status icon, and a Comparison
/// section listing only the mismatch rows.
pub fn export_workbook(
    outcome: &ReconcileOutcome,
    summary_old: &ReportSummary,
    summary_new: &ReportSummary,
    index_old: &ReportIndex,
    index_new: &ReportIndex,
    run_id: &str,
    output_path: &Path,
) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;

    writeln!(file, "# TestNG Comparison Report\n")?;
    writeln!(file, "**Run**: {}", run_id)?;
    writeln!(file, "**Generated**: {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;

    writeln!(file, "## Overview\n")?;
    writeln!(
        file,
        "| File | Passed | Failed | Skipped | Ignored | Total | Started At | Finished At | Duration (ms) |"
    )?;
    writeln!(file, "|---|---|---|---|---|---|---|---|---|")?;
    for summary in [summary_old, summary_new] {
        writeln!(
            file,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            md_cell(&summary.file_name),
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.ignored,
            summary.total,
            md_cell(&summary.started_at),
            md_cell(&summary.finished_at),
            summary.duration_ms
        )?;
    }
    writeln!(file)?;
    for summary in [summary_old, summary_new] {
        if summary.duplicate_names > 0 {
            writeln!(
                file,
                "{} contained {} duplicate test name(s); the last occurrence won.\n",
                md_cell(&summary.file_name),
                summary.duplicate_names
            )?;
        }
    }

    write_file_section(&mut file, index_old)?;
    write_file_section(&mut file, index_new)?;

    writeln!(file, "## Comparison\n")?;
    if outcome.rows.is_empty() {
        writeln!(file, "No mismatches: both reports agree on every test case.\n")?;
    } else {
        writeln!(file, "{} mismatch(es).\n", outcome.mismatches)?;
        writeln!(
            file,
            "| Test Case | Status (File1) | Status (File2) | Description (File1) | Description (File2) |"
        )?;
        writeln!(file, "|---|---|---|---|---|")?;
        for row in &outcome.rows {
            let name = if row.name_old.is_empty() { &row.name_new } else { &row.name_old };
            writeln!(
                file,
                "| {} | {} | {} | {} | {} |",
                md_cell(name),
                status_cell(&row.status_old),
                status_cell(&row.status_new),
                md_cell(&row.description_old),
                md_cell(&row.description_new)
            )?;
        }
        writeln!(file)?;
    }

    Ok(())
}

/// One workbook section listing every test in a report.
fn write_file_section(file: &mut File, index: &ReportIndex) -> std::io::Result<()> {
    writeln!(file, "## {}\n", md_cell(&index.label))?;
    if index.is_empty() {
        writeln!(file, "No test cases.\n")?;
        return Ok(());
    }
    writeln!(file, "| Test Case | Status | Description |")?;
    writeln!(file, "|---|---|---|")?;
    for (name, result) in &index.tests {
        writeln!(
            file,
            "| {} | {} {} | {} |",
            md_cell(name),
            StatusClass::of(&result.status).icon(),
            md_cell(&result.status),
            md_cell(&result.description)
        )?;
    }
    writeln!(file)?;
    Ok(())
}

/// Status cell with icon; empty statuses (one-sided rows) stay empty.
fn status_cell(status: &str) -> String {
    if status.is_empty() {
        String::new()
    } else {
        format!("{} {}", StatusClass::of(status).icon(), md_cell(status))
    }
}

/// Keep pipes and line breaks from breaking the table layout.
fn md_cell(raw: &str) -> String {
    raw.replace('|', "\\|").replace(['\n', '\r'], " ")
}
