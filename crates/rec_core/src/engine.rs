//! The validation engine.
//!
//! Lists the recording directory once, then runs each registered check
//! against the same immutable listing and collects their findings in
//! registration order.

use rayon::prelude::*;

use crate::checklist::ChecklistMatrix;
use crate::checks::{default_checks, Check, CheckContext};
use crate::config::ValidationConfig;
use crate::discovery::{discover_recordings, RecordingFile};
use crate::error::Result;
use crate::report::{Finding, ValidationReport};

/// Runs a battery of checks over one recording directory.
pub struct ValidationEngine {
    config: ValidationConfig,
    checklist: ChecklistMatrix,
    checks: Vec<Box<dyn Check>>,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("config", &self.config)
            .field("checklist_entries", &self.checklist.len())
            .field("checks", &self.check_names())
            .finish()
    }
}

impl ValidationEngine {
    /// Engine with the standard battery of checks.
    #[must_use]
    pub fn new(config: ValidationConfig, checklist: ChecklistMatrix) -> Self {
        Self {
            config,
            checklist,
            checks: default_checks(),
        }
    }

    /// Engine with no checks registered.
    #[must_use]
    pub fn empty(config: ValidationConfig, checklist: ChecklistMatrix) -> Self {
        Self {
            config,
            checklist,
            checks: Vec::new(),
        }
    }

    /// Engine for `config`, loading the checklist it names.
    pub fn from_config(config: ValidationConfig) -> Result<Self> {
        let checklist = config.load_checklist()?;
        Ok(Self::new(config, checklist))
    }

    /// Append a check; it runs after those already registered.
    pub fn register(&mut self, check: Box<dyn Check>) -> &mut Self {
        self.checks.push(check);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_check(mut self, check: Box<dyn Check>) -> Self {
        self.checks.push(check);
        self
    }

    /// Names of the registered checks, in run order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run settings.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Expected recordings.
    #[must_use]
    pub fn checklist(&self) -> &ChecklistMatrix {
        &self.checklist
    }

    /// Discover the configured directory and run every check.
    ///
    /// # Errors
    ///
    /// Fails only if the directory cannot be listed.
    pub fn run(&self) -> Result<ValidationReport> {
        tracing::info!("Validating recordings in {}", self.config.data_dir.display());
        let files = discover_recordings(&self.config.data_dir)?;
        Ok(self.run_on(&files))
    }

    /// Run every check against an existing listing.
    #[must_use]
    pub fn run_on(&self, files: &[RecordingFile]) -> ValidationReport {
        let ctx = CheckContext {
            files,
            checklist: &self.checklist,
            config: &self.config,
        };

        let results: Vec<(String, Vec<Finding>)> = if self.config.parallel {
            self.checks
                .par_iter()
                .map(|check| run_check(check.as_ref(), &ctx))
                .collect()
        } else {
            self.checks
                .iter()
                .map(|check| run_check(check.as_ref(), &ctx))
                .collect()
        };

        let report = ValidationReport::from_check_results(files.len(), results);
        tracing::info!(
            "Validation finished: {} finding(s) over {} file(s)",
            report.len(),
            report.files_scanned
        );
        report
    }
}

fn run_check(check: &dyn Check, ctx: &CheckContext<'_>) -> (String, Vec<Finding>) {
    let name = check.name().to_string();
    tracing::debug!("Running check {name}");
    let findings = check.run(ctx);
    if findings.is_empty() {
        tracing::info!("{name}: ok");
    } else {
        tracing::info!("{name}: {} finding(s)", findings.len());
    }
    (name, findings)
}
