use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::catalog::Catalog;
use crate::file_utils::{FileManager, FilePattern};
use crate::validation::{EntryFinding, ValidationConfig, ValidationService};

// @module: Application controller for catalog validation

/// Outcome of checking one catalog file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path of the catalog
    pub path: PathBuf,
    /// Number of (source, translation) pairs examined
    pub entries_checked: usize,
    /// Findings in catalog order
    pub findings: Vec<EntryFinding>,
    /// Set when the catalog could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Whether the file is clean and was read successfully
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.findings.is_empty()
    }
}

/// Aggregated outcome of a run over many files
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub files_checked: usize,
    pub entries_checked: usize,
    pub findings: usize,
    pub failed_files: usize,
}

impl RunSummary {
    fn push(&mut self, report: FileReport) {
        self.files_checked += 1;
        self.entries_checked += report.entries_checked;
        self.findings += report.findings.len();
        if report.error.is_some() {
            self.failed_files += 1;
        }
        self.files.push(report);
    }

    /// True when no file produced a finding or an error
    pub fn success(&self) -> bool {
        self.findings == 0 && self.failed_files == 0
    }
}

/// Process exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing to report
    Success = 0,
    /// Findings or unreadable catalogs
    Problems = 1,
    /// Bad arguments, configuration or directory
    Fatal = 2,
}

impl ExitStatus {
    /// Map the outcome of a command (`Ok(passed)` or a fatal error)
    pub fn from_outcome<E>(outcome: &Result<bool, E>) -> Self {
        match outcome {
            Ok(true) => ExitStatus::Success,
            Ok(false) => ExitStatus::Problems,
            Err(_) => ExitStatus::Fatal,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Main application controller for catalog validation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Compiled file pattern
    pattern: FilePattern,
    // @field: Validation service built from the config
    validator: ValidationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pattern = FilePattern::new(&config.pattern)
            .context("Invalid catalog file pattern")?;
        let validator = ValidationService::with_config(ValidationConfig::from(&config));

        Ok(Self {
            config,
            pattern,
            validator,
        })
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check a single catalog file
    ///
    /// Unreadable or malformed catalogs are reported in the returned
    /// `FileReport` rather than as an error, so one bad file does not stop
    /// the run.
    pub fn check_file(&self, path: &Path) -> FileReport {
        debug!("Checking {:?}", path);

        match Catalog::from_path(path) {
            Ok(catalog) => {
                let validation = self.validator.validate_catalog(&catalog);
                FileReport {
                    path: path.to_path_buf(),
                    entries_checked: validation.entries_checked,
                    findings: validation.findings,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                FileReport {
                    path: path.to_path_buf(),
                    entries_checked: 0,
                    findings: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Discover and check every matching catalog under `dir`
    pub fn run<P: AsRef<Path>>(&self, dir: P) -> Result<RunSummary> {
        let dir = dir.as_ref();
        let start_time = Instant::now();

        let files = FileManager::find_catalogs(dir, &self.pattern)
            .with_context(|| format!("Failed to list catalogs in {:?}", dir))?;

        if files.is_empty() {
            warn!("No files matching '{}' found in {:?}", self.pattern.as_str(), dir);
        } else {
            info!("Checking {} catalog(s) in {:?}", files.len(), dir);
        }

        let mut summary = RunSummary::default();
        for file in &files {
            summary.push(self.check_file(file));
        }

        info!(
            "Checked {} entries in {} file(s) in {:.2?}: {} finding(s), {} unreadable file(s)",
            summary.entries_checked,
            summary.files_checked,
            start_time.elapsed(),
            summary.findings,
            summary.failed_files
        );

        Ok(summary)
    }
}
