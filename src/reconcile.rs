//! Reconciliation of two report indexes.
//!
//! This is the comparison core: classify the two name sets, compare
//! statuses for the common names, and emit one `ComparisonRow` per
//! discrepancy. Pure functions over immutable indexes; no I/O here.

use crate::types::{Classification, ComparisonRow, ReconcileOutcome, ReportIndex};
use std::collections::BTreeSet;

/// Split the two key sets into common / only-in-old / only-in-new.
///
/// Each vector comes out sorted ascending, so downstream iteration is
/// deterministic for identical inputs.
pub fn classify(old: &ReportIndex, new: &ReportIndex) -> Classification {
    let mut common = Vec::new();
    let mut only_in_old = Vec::new();

    // BTreeMap keys already iterate in ascending order.
    for name in old.names() {
        if new.tests.contains_key(name) {
            common.push(name.clone());
        } else {
            only_in_old.push(name.clone());
        }
    }

    let only_in_new =
        new.names().filter(|name| !old.tests.contains_key(name.as_str())).cloned().collect();

    Classification { common, only_in_old, only_in_new }
}

/// Compare two reports and emit one row per discrepancy.
///
/// Common names whose statuses compare equal (exact, case-sensitive) are
/// in agreement and produce no row. Rows come out in a fixed order:
/// status mismatches, then tests only in the new report, then tests only
/// in the old one, each block sorted by name.
pub fn reconcile(old: &ReportIndex, new: &ReportIndex) -> ReconcileOutcome {
    let classification = classify(old, new);
    reconcile_classified(old, new, &classification)
}

/// `reconcile` against a precomputed classification.
///
/// Callers that also want to run `verify` use this form so classification
/// and outcome come from the same pass.
pub fn reconcile_classified(
    old: &ReportIndex,
    new: &ReportIndex,
    classification: &Classification,
) -> ReconcileOutcome {
    let mut rows = Vec::new();

    for name in &classification.common {
        // Classification guarantees presence on both sides; a miss here is
        // a reconciler bug, not bad input.
        let in_old = old
            .get(name)
            .unwrap_or_else(|| panic!("{name:?} classified common but absent from {}", old.label));
        let in_new = new
            .get(name)
            .unwrap_or_else(|| panic!("{name:?} classified common but absent from {}", new.label));

        if in_old.status == in_new.status {
            continue;
        }
        rows.push(ComparisonRow {
            name_old: name.clone(),
            name_new: name.clone(),
            status_old: in_old.status.clone(),
            status_new: in_new.status.clone(),
            description_old: in_old.description.clone(),
            description_new: in_new.description.clone(),
        });
    }

    for name in &classification.only_in_new {
        let in_new = new
            .get(name)
            .unwrap_or_else(|| panic!("{name:?} classified only-in-new but absent from {}", new.label));
        rows.push(ComparisonRow {
            name_old: String::new(),
            name_new: name.clone(),
            status_old: String::new(),
            status_new: in_new.status.clone(),
            description_old: String::new(),
            description_new: in_new.description.clone(),
        });
    }

    for name in &classification.only_in_old {
        let in_old = old
            .get(name)
            .unwrap_or_else(|| panic!("{name:?} classified only-in-old but absent from {}", old.label));
        rows.push(ComparisonRow {
            name_old: name.clone(),
            name_new: String::new(),
            status_old: in_old.status.clone(),
            status_new: String::new(),
            description_old: in_old.description.clone(),
            description_new: String::new(),
        });
    }

    let mismatches = rows.len();
    ReconcileOutcome { rows, mismatches }
}

/// Structural self-check over a finished reconciliation.
///
/// Verifies that the classification partitions the union of both key sets
/// (no overlap, no omission, each name on the correct side) and that the
/// mismatch count equals the number of rows. A failure means the
/// reconciler itself is broken, so callers abort instead of writing a
/// report that looks plausible but is wrong.
pub fn verify(
    old: &ReportIndex,
    new: &ReportIndex,
    classification: &Classification,
    outcome: &ReconcileOutcome,
) -> Result<(), String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for name in classification
        .common
        .iter()
        .chain(&classification.only_in_old)
        .chain(&classification.only_in_new)
    {
        if !seen.insert(name.as_str()) {
            return Err(format!("classification sets overlap on {name:?}"));
        }
    }

    for name in &classification.common {
        if old.get(name).is_none() || new.get(name).is_none() {
            return Err(format!("{name:?} classified common but missing from an index"));
        }
    }
    for name in &classification.only_in_old {
        if old.get(name).is_none() || new.get(name).is_some() {
            return Err(format!("{name:?} misclassified as only in {}", old.label));
        }
    }
    for name in &classification.only_in_new {
        if new.get(name).is_none() || old.get(name).is_some() {
            return Err(format!("{name:?} misclassified as only in {}", new.label));
        }
    }

    let union: BTreeSet<&str> =
        old.names().chain(new.names()).map(|name| name.as_str()).collect();
    if seen.len() != union.len() {
        return Err(format!(
            "classification covers {} names, expected {}",
            seen.len(),
            union.len()
        ));
    }

    if outcome.mismatches != outcome.rows.len() {
        return Err(format!(
            "mismatch count {} disagrees with {} emitted rows",
            outcome.mismatches,
            outcome.rows.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;
