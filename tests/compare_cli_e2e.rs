/// End-to-end tests for the testng-diff binary
///
/// These run the compiled binary against XML fixtures and check exit
/// codes, console output, and the artifacts written to disk.
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("tests/fixtures")
}

fn old_report() -> PathBuf {
    fixtures_dir().join("testng-results_old.xml")
}

fn new_report() -> PathBuf {
    fixtures_dir().join("testng-results_new.xml")
}

fn run_diff(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_testng-diff"))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run testng-diff {}: {}", args.join(" "), e))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn fixtures_exist() {
    assert!(old_report().exists());
    assert!(new_report().exists());
}

#[test]
fn mismatches_are_reported_and_exit_code_is_two() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = run_diff(&[
        old_report().to_str().unwrap(),
        new_report().to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--run-id",
        "e2e",
    ]);

    assert_eq!(output.status.code(), Some(2), "stdout: {}", stdout_of(&output));

    let csv = std::fs::read_to_string(out_dir.path().join("report_e2e.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            "test_case_file1,test_case_file_2,status_file1,status_file2,description_file1,description_file2",
            // Status mismatch block first
            "checkout_with_expired_card,checkout_with_expired_card,FAIL,PASS,Expired card is rejected,Expired card is rejected",
            // Then only-in-new, comma in the description forces quoting
            ",checkout_with_gift_card,,PASS,,\"Pay with gift card, partial balance\"",
            // Then only-in-old
            "legacy_receipt_format,,PASS,,Old receipt layout,",
        ]
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Status mismatches:  1"), "stdout: {stdout}");
    assert!(stdout.contains("Only in old report: 1"), "stdout: {stdout}");
    assert!(stdout.contains("Only in new report: 1"), "stdout: {stdout}");
    assert!(stdout.contains("Total:              3"), "stdout: {stdout}");

    // Hooks were excluded before comparison, so they never show up.
    assert!(!csv.contains("TSQA_beforeMethod"));
    assert!(!csv.contains("TSQA_afterMethod"));

    // Secondary artifacts exist alongside the CSV.
    let workbook =
        std::fs::read_to_string(out_dir.path().join("report_e2e.md")).unwrap();
    assert!(workbook.contains("## Overview"));
    assert!(workbook.contains("## testng-results_old.xml"));
    assert!(workbook.contains("## testng-results_new.xml"));
    assert!(workbook.contains("## Comparison"));
    assert!(workbook.contains("checkout_with_expired_card"));

    let json = std::fs::read_to_string(out_dir.path().join("report_e2e.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["mismatches"], 3);
    assert_eq!(parsed["rows"].as_array().unwrap().len(), 3);
}

#[test]
fn identical_reports_exit_clean() {
    // Compare the old fixture against a copy of itself; same content,
    // different path, so validation lets it through.
    let dir = tempfile::tempdir().unwrap();
    let copy = dir.path().join("copy.xml");
    std::fs::copy(old_report(), &copy).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = run_diff(&[
        old_report().to_str().unwrap(),
        copy.to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--run-id",
        "clean",
    ]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout_of(&output));

    let csv = std::fs::read_to_string(out_dir.path().join("report_clean.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1, "only the header expected: {csv}");

    let workbook = std::fs::read_to_string(out_dir.path().join("report_clean.md")).unwrap();
    assert!(workbook.contains("No mismatches"));
}

#[test]
fn csv_only_skips_secondary_artifacts() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = run_diff(&[
        old_report().to_str().unwrap(),
        new_report().to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--run-id",
        "csvonly",
        "--csv-only",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(out_dir.path().join("report_csvonly.csv").exists());
    assert!(!out_dir.path().join("report_csvonly.md").exists());
    assert!(!out_dir.path().join("report_csvonly.json").exists());
}

#[test]
fn missing_input_file_fails_with_context() {
    let out_dir = tempfile::tempdir().unwrap();
    let missing = fixtures_dir().join("does-not-exist.xml");
    let output = run_diff(&[
        missing.to_str().unwrap(),
        new_report().to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("not found"), "stdout: {stdout}");
    assert!(stdout.contains("does-not-exist.xml"), "stdout: {stdout}");
}

#[test]
fn comparing_a_file_against_itself_is_rejected() {
    let output = run_diff(&[
        old_report().to_str().unwrap(),
        old_report().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("same file"));
}

#[test]
fn exclusion_set_is_configurable_end_to_end() {
    // Replace the built-in exclusions entirely: the hook entries agree in
    // both fixtures so they add no rows, and excluding the two one-sided
    // tests leaves just the status mismatch.
    let out_dir = tempfile::tempdir().unwrap();
    let output = run_diff(&[
        old_report().to_str().unwrap(),
        new_report().to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--run-id",
        "hooks",
        "--no-default-excludes",
        "--exclude",
        "legacy_receipt_format",
        "checkout_with_gift_card",
    ]);

    assert_eq!(output.status.code(), Some(2), "stdout: {}", stdout_of(&output));

    let csv = std::fs::read_to_string(out_dir.path().join("report_hooks.csv")).unwrap();
    // Only the genuine status mismatch remains.
    assert_eq!(csv.lines().count(), 2, "csv: {csv}");
    assert!(csv.contains("checkout_with_expired_card"));
    assert!(!csv.contains("legacy_receipt_format"));
    assert!(!csv.contains("checkout_with_gift_card"));
}

#[test]
fn malformed_xml_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.xml");
    std::fs::write(&broken, "<testng-results><suite>").unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = run_diff(&[
        broken.to_str().unwrap(),
        new_report().to_str().unwrap(),
        "--output-dir",
        out_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("malformed"));
}
