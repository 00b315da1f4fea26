use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Setup/teardown hook names dropped from both reports before comparison,
/// unless --no-default-excludes is given. These are infrastructure entries
/// TestNG records alongside real test cases.
pub const DEFAULT_EXCLUDED_TESTS: [&str; 5] =
    ["TSQA_afterMethod", "TSQA_beforeMethod", "TSQA_setUp", "TSQA_tearDown", "setTestSuite"];

#[derive(Parser, Debug, Clone)]
#[command(name = "testng-diff")]
#[command(about = "Compare two TestNG result files and report status mismatches")]
#[command(version)]
pub struct CliArgs {
    /// Baseline TestNG results file (file 1, the "old" run)
    #[arg(value_name = "OLD_REPORT")]
    pub old_report: PathBuf,

    /// TestNG results file to compare against the baseline (file 2, the "new" run)
    #[arg(value_name = "NEW_REPORT")]
    pub new_report: PathBuf,

    /// Directory for generated report artifacts
    #[arg(long, default_value = "results", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Identifier stamped into artifact file names (default: local timestamp)
    #[arg(long, value_name = "ID")]
    pub run_id: Option<String>,

    /// Additional test names to exclude from comparison
    /// Can specify multiple: --exclude warmup drop_fixtures
    #[arg(long, value_name = "NAME", num_args = 1.., value_delimiter = ' ')]
    pub exclude: Vec<String>,

    /// Do not exclude the built-in setup/teardown hook names
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Write only the comparison CSV, skipping the workbook and JSON artifacts
    #[arg(long)]
    pub csv_only: bool,

    /// Suppress per-row console output (overview and summary still print)
    #[arg(long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.old_report == self.new_report {
            return Err(
                "OLD_REPORT and NEW_REPORT are the same file; nothing to compare".to_string()
            );
        }

        if let Some(ref id) = self.run_id {
            let filename_safe =
                !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !filename_safe {
                return Err(format!(
                    "run id {id:?} is not filename-safe (use letters, digits, '-', '_')"
                ));
            }
        }

        Ok(())
    }

    /// The full exclusion set: built-in hook names plus --exclude entries.
    pub fn exclusions(&self) -> BTreeSet<String> {
        let mut set: BTreeSet<String> = if self.no_default_excludes {
            BTreeSet::new()
        } else {
            DEFAULT_EXCLUDED_TESTS.iter().map(|s| s.to_string()).collect()
        };
        set.extend(self.exclude.iter().cloned());
        set
    }
}
