//! TestNG results loading.
//!
//! Parses a `testng-results.xml` file into a name-indexed `ReportIndex`
//! plus the run-level `ReportSummary`, applying the configured test-name
//! exclusions before anything reaches the reconciler.

use crate::types::{ReportIndex, ReportSummary, TestResult};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a report could not be loaded. Every variant carries the file path
/// so failures are diagnosable without re-running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotFound { path: PathBuf },
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { path } => {
                write!(f, "report file not found: {}", path.display())
            }
            LoadError::Io { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            LoadError::Parse { path, message } => {
                write!(f, "malformed TestNG results in {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Parse one TestNG results file.
///
/// Test cases whose name is in `exclusions` (setup/teardown hooks and the
/// like) are dropped before indexing. Duplicate names keep the last
/// occurrence; each collision is logged and counted on the summary.
pub fn load_report(
    path: &Path,
    exclusions: &BTreeSet<String>,
) -> Result<(ReportIndex, ReportSummary), LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound { path: path.to_path_buf() });
    }
    let text = fs::read_to_string(path)
        .map_err(|e| LoadError::Io { path: path.to_path_buf(), message: e.to_string() })?;

    let doc = roxmltree::Document::parse(&text)
        .map_err(|e| LoadError::Parse { path: path.to_path_buf(), message: e.to_string() })?;

    let root = doc.root_element();
    if !root.has_tag_name("testng-results") {
        return Err(LoadError::Parse {
            path: path.to_path_buf(),
            message: format!("expected <testng-results> root, found <{}>", root.tag_name().name()),
        });
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();

    let mut summary = ReportSummary {
        file_name: file_name.clone(),
        passed: count_attr(root, "passed", path)?,
        failed: count_attr(root, "failed", path)?,
        skipped: count_attr(root, "skipped", path)?,
        ignored: count_attr(root, "ignored", path)?,
        total: count_attr(root, "total", path)?,
        ..ReportSummary::default()
    };

    // Timing lives on the first <suite>; a report without one simply has
    // no timing to show. Overview data only, never compared.
    if let Some(suite) = root.children().find(|n| n.has_tag_name("suite")) {
        summary.started_at = suite.attribute("started-at").unwrap_or_default().to_string();
        summary.finished_at = suite.attribute("finished-at").unwrap_or_default().to_string();
        summary.duration_ms = count_attr(suite, "duration-ms", path)?;
    }

    let mut index = ReportIndex::new(file_name);
    for node in doc.descendants().filter(|n| n.has_tag_name("test-method")) {
        let name = node.attribute("name").ok_or_else(|| LoadError::Parse {
            path: path.to_path_buf(),
            message: "test-method without a name attribute".to_string(),
        })?;

        if exclusions.contains(name) {
            debug!("excluding {} from {}", name, path.display());
            continue;
        }

        let status = node.attribute("status").ok_or_else(|| LoadError::Parse {
            path: path.to_path_buf(),
            message: format!("test-method {name:?} has no status attribute"),
        })?;
        let description = node.attribute("description").unwrap_or_default();

        let result =
            TestResult { status: status.to_string(), description: description.to_string() };
        if index.insert(name.to_string(), result).is_some() {
            warn!(
                "duplicate test-method {:?} in {}, keeping the last occurrence",
                name,
                path.display()
            );
            summary.duplicate_names += 1;
        }
    }

    info!(
        "{}: {} test cases indexed (passed {}, failed {}, skipped {}, ignored {}, total {})",
        path.display(),
        index.len(),
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.ignored,
        summary.total
    );

    Ok((index, summary))
}

/// Parse an unsigned counter attribute; absent means zero.
fn count_attr(node: roxmltree::Node<'_, '_>, attr: &str, path: &Path) -> Result<u64, LoadError> {
    match node.attribute(attr) {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|_| LoadError::Parse {
            path: path.to_path_buf(),
            message: format!("attribute {attr}={raw:?} is not an unsigned integer"),
        }),
    }
}
