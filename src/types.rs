//! Core data structures for report comparison.
//!
//! This module defines the model shared by the loader, the reconciler,
//! and the report writers. Everything here is built once per run and
//! read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One test case's outcome in one report.
///
/// The test name is the key of the owning `ReportIndex`, not a field here.
/// Status stays an open string: TestNG emits PASS/FAIL/SKIP, but listeners
/// can inject custom values, so it is never narrowed into a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub status: String,
    pub description: String,
}

/// Three-way presentation class of a status string.
///
/// Only the writers look at this (colors, icons); the reconciler compares
/// the raw status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Pass,
    Fail,
    Other,
}

impl StatusClass {
    pub fn of(status: &str) -> Self {
        match status {
            "PASS" => StatusClass::Pass,
            "FAIL" => StatusClass::Fail,
            _ => StatusClass::Other,
        }
    }

    /// Get the unicode marker used in the workbook output.
    pub fn icon(&self) -> &'static str {
        match self {
            StatusClass::Pass => "✓",
            StatusClass::Fail => "✗",
            StatusClass::Other => "⊘",
        }
    }
}

/// Name-indexed test results for one report.
///
/// At most one entry per name. Duplicate names in the source file resolve
/// last-write-wins in the loader, which logs and counts each collision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIndex {
    /// Display label for this report, normally the source file name.
    pub label: String,
    pub tests: BTreeMap<String, TestResult>,
}

impl ReportIndex {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), tests: BTreeMap::new() }
    }

    /// Insert a result, returning the previous entry when the name repeats.
    pub fn insert(&mut self, name: String, result: TestResult) -> Option<TestResult> {
        self.tests.insert(name, result)
    }

    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.tests.get(name)
    }

    /// Test names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.tests.keys()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Aggregate counters for one report, used only for the overview output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub file_name: String,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub ignored: u64,
    pub total: u64,
    pub started_at: String,
    pub finished_at: String,
    pub duration_ms: u64,
    /// How many test names appeared more than once in the source file.
    pub duplicate_names: u64,
}

/// Disjoint name sets computed from two report indexes.
///
/// Invariant: the three vectors partition the union of both key sets,
/// each sorted ascending. `reconcile::verify` checks this after every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub common: Vec<String>,
    pub only_in_old: Vec<String>,
    pub only_in_new: Vec<String>,
}

/// One comparison record: a status mismatch or a one-sided test case.
///
/// Sides absent from a report carry empty strings, mirroring the CSV
/// cells they end up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name_old: String,
    pub name_new: String,
    pub status_old: String,
    pub status_new: String,
    pub description_old: String,
    pub description_new: String,
}

impl ComparisonRow {
    /// True when the test case exists in both reports (a status mismatch).
    pub fn is_common(&self) -> bool {
        !self.name_old.is_empty() && !self.name_new.is_empty()
    }
}

/// What the reconciler hands to the writers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub rows: Vec<ComparisonRow>,
    pub mismatches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_class_is_exact_match() {
        assert_eq!(StatusClass::of("PASS"), StatusClass::Pass);
        assert_eq!(StatusClass::of("FAIL"), StatusClass::Fail);
        assert_eq!(StatusClass::of("SKIP"), StatusClass::Other);
        // Case matters; runners that emit lowercase get the neutral class.
        assert_eq!(StatusClass::of("pass"), StatusClass::Other);
        assert_eq!(StatusClass::of("TIMEOUT"), StatusClass::Other);
        assert_eq!(StatusClass::of(""), StatusClass::Other);
    }

    #[test]
    fn index_insert_is_last_write_wins() {
        let mut index = ReportIndex::new("a.xml");
        let first = TestResult { status: "PASS".to_string(), description: String::new() };
        let second = TestResult { status: "FAIL".to_string(), description: String::new() };

        assert!(index.insert("t1".to_string(), first.clone()).is_none());
        let previous = index.insert("t1".to_string(), second.clone());

        assert_eq!(previous, Some(first));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("t1"), Some(&second));
    }

    #[test]
    fn index_names_are_sorted() {
        let mut index = ReportIndex::new("a.xml");
        for name in ["zeta", "alpha", "mid"] {
            index.insert(
                name.to_string(),
                TestResult { status: "PASS".to_string(), description: String::new() },
            );
        }
        let names: Vec<&String> = index.names().collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }
}
