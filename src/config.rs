//! Run planning.
//!
//! Resolves CLI arguments into an immutable `RunPlan` before any report
//! is touched: input paths, exclusion set, run id, artifact locations.
//! The rest of the program only ever sees the finished plan.

use crate::cli::CliArgs;
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// Fully resolved inputs and outputs for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub old_report: PathBuf,
    pub new_report: PathBuf,
    pub output_dir: PathBuf,
    pub run_id: String,
    pub exclusions: BTreeSet<String>,
    pub csv_only: bool,
    pub quiet: bool,
}

impl RunPlan {
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("report_{}.csv", self.run_id))
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.output_dir.join(format!("report_{}.md", self.run_id))
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(format!("report_{}.json", self.run_id))
    }
}

/// Build a complete RunPlan from CLI arguments.
///
/// Also ensures the output directory exists, so writers can assume a
/// valid target.
pub fn build_run_plan(args: &CliArgs) -> Result<RunPlan, String> {
    let run_id = args.run_id.clone().unwrap_or_else(default_run_id);
    debug!("run id: {}", run_id);

    let exclusions = args.exclusions();
    debug!("{} test names excluded from comparison", exclusions.len());

    fs::create_dir_all(&args.output_dir).map_err(|e| {
        format!("failed to create output directory {}: {}", args.output_dir.display(), e)
    })?;

    Ok(RunPlan {
        old_report: args.old_report.clone(),
        new_report: args.new_report.clone(),
        output_dir: args.output_dir.clone(),
        run_id,
        exclusions,
        csv_only: args.csv_only,
        quiet: args.quiet,
    })
}

/// Timestamp identifier, unique per run at second granularity and
/// lexically sortable across runs.
fn default_run_id() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_output(dir: PathBuf) -> CliArgs {
        CliArgs {
            old_report: PathBuf::from("old.xml"),
            new_report: PathBuf::from("new.xml"),
            output_dir: dir,
            run_id: Some("run42".to_string()),
            exclude: vec![],
            no_default_excludes: false,
            csv_only: false,
            quiet: false,
        }
    }

    #[test]
    fn artifact_paths_carry_the_run_id() {
        let dir = tempfile::tempdir().unwrap();
        let plan = build_run_plan(&args_with_output(dir.path().to_path_buf())).unwrap();

        assert_eq!(plan.csv_path(), dir.path().join("report_run42.csv"));
        assert_eq!(plan.workbook_path(), dir.path().join("report_run42.md"));
        assert_eq!(plan.json_path(), dir.path().join("report_run42.json"));
    }

    #[test]
    fn output_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("nightly");
        build_run_plan(&args_with_output(nested.clone())).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn default_run_id_is_filename_safe() {
        let id = default_run_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }
}
