//! Validation findings and their rendering.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One problem found by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Name of the check that produced it.
    pub check: String,
    /// Human-readable description.
    pub message: String,
    /// Files implicated, in discovery order.
    pub files: Vec<String>,
}

impl Finding {
    /// Create a finding with no implicated files.
    pub fn new(check: &str, message: impl Into<String>) -> Self {
        Self {
            check: check.to_string(),
            message: message.into(),
            files: Vec::new(),
        }
    }

    /// Attach one implicated file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Attach several implicated files.
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }
}

/// Ordered findings of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of CSV files discovered.
    pub files_scanned: usize,
    /// Checks executed, in order.
    pub checks_run: Vec<String>,
    /// Findings grouped by check, in check order.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Assemble a report from per-check results in execution order.
    pub fn from_check_results(
        files_scanned: usize,
        results: impl IntoIterator<Item = (String, Vec<Finding>)>,
    ) -> Self {
        let mut report = Self {
            files_scanned,
            ..Self::default()
        };
        for (check, findings) in results {
            report.checks_run.push(check);
            report.findings.extend(findings);
        }
        report
    }

    /// Whether the dataset passed every check.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings produced by one check.
    pub fn findings_for<'a>(&'a self, check: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.check == check)
    }

    /// Plain-text report, one `[check] message` line per finding.
    ///
    /// Findings implicating several files list them on indented lines.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            let _ = writeln!(out, "[{}] {}", finding.check, finding.message);
            if finding.files.len() > 1 {
                for file in &finding.files {
                    let _ = writeln!(out, "    - {file}");
                }
            }
        }
        let _ = writeln!(
            out,
            "{} finding(s) from {} check(s) over {} file(s)",
            self.findings.len(),
            self.checks_run.len(),
            self.files_scanned
        );
        out
    }

    /// Pretty-printed JSON report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
