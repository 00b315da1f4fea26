// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod loader;
mod reconcile;
mod report;
mod types;
mod ui;

use config::RunPlan;
use std::path::Path;
use types::{ReportIndex, ReportSummary};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Resolve everything upfront: run id, exclusions, artifact paths
    let plan = match config::build_run_plan(&args) {
        Ok(p) => p,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    ui::status(&format!("run {}", plan.run_id));
    ui::status(&format!(
        "comparing {} against {}",
        plan.old_report.display(),
        plan.new_report.display()
    ));

    // Both reports are required; a load failure ends the run.
    let (index_old, summary_old) = load_or_exit(&plan.old_report, &plan);
    let (index_new, summary_new) = load_or_exit(&plan.new_report, &plan);

    let classification = reconcile::classify(&index_old, &index_new);
    let outcome = reconcile::reconcile_classified(&index_old, &index_new, &classification);

    // Self-check before anything is written: a broken reconciliation must
    // never end up looking like a clean report.
    if let Err(e) = reconcile::verify(&index_old, &index_new, &classification, &outcome) {
        ui::print_error(&format!("internal error: {}", e));
        std::process::exit(1);
    }

    report::print_overview(&summary_old, &summary_new);
    if !plan.quiet {
        report::print_comparison(&outcome.rows);
    }

    // The CSV is the primary artifact; losing it fails the run.
    let csv_path = plan.csv_path();
    if let Err(e) = report::export_csv_report(&outcome.rows, &csv_path) {
        ui::print_error(&format!("Failed to write {}: {}", csv_path.display(), e));
        std::process::exit(1);
    }
    ui::status(&format!("comparison CSV saved to {}", csv_path.display()));

    // Secondary artifacts degrade to a warning
    if !plan.csv_only {
        let workbook_path = plan.workbook_path();
        match report::export_workbook(
            &outcome,
            &summary_old,
            &summary_new,
            &index_old,
            &index_new,
            &plan.run_id,
            &workbook_path,
        ) {
            Ok(_) => ui::status(&format!("workbook saved to {}", workbook_path.display())),
            Err(e) => eprintln!("Warning: Failed to save workbook: {}", e),
        }

        let json_path = plan.json_path();
        match report::export_json_report(
            &outcome,
            &summary_old,
            &summary_new,
            &plan.run_id,
            &json_path,
        ) {
            Ok(_) => ui::status(&format!("JSON report saved to {}", json_path.display())),
            Err(e) => eprintln!("Warning: Failed to save JSON report: {}", e),
        }
    }

    report::print_run_summary(&outcome);

    // Determine exit code
    let exit_code = if outcome.mismatches > 0 { 2 } else { 0 };
    std::process::exit(exit_code);
}

fn load_or_exit(path: &Path, plan: &RunPlan) -> (ReportIndex, ReportSummary) {
    match loader::load_report(path, &plan.exclusions) {
        Ok(loaded) => loaded,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
