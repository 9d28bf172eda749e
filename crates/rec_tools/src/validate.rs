//! Dataset validation front end.
//!
//! Resolves the run configuration from a config file and command-line
//! overrides, runs the engine and renders the report.

use std::path::PathBuf;

use rec_core::checklist::ChecklistMatrix;
use rec_core::config::ValidationConfig;
use rec_core::engine::ValidationEngine;
use rec_core::error::ValidationError;
use rec_core::report::ValidationReport;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop the tool before a report is produced.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Configuration, checklist or directory problem.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Neither the command line nor the config named a directory.
    #[error("No recording directory given (pass a path or set data_dir in the config)")]
    MissingDataDir,

    /// The report could not be serialised.
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per finding.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Command-line settings layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Recording directory.
    pub data_dir: Option<PathBuf>,
    /// RON config file.
    pub config: Option<PathBuf>,
    /// RON checklist file.
    pub checklist: Option<PathBuf>,
    /// Header line count.
    pub header_size: Option<usize>,
    /// Run checks on the thread pool.
    pub parallel: bool,
}

impl Overrides {
    /// Merge the config file (if any) with these overrides.
    pub fn resolve(&self) -> Result<ValidationConfig, ToolError> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                ValidationConfig::load(path)?
            }
            None => ValidationConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        if config.data_dir.as_os_str().is_empty() {
            return Err(ToolError::MissingDataDir);
        }
        if let Some(path) = &self.checklist {
            config.checklist = Some(path.clone());
        }
        if let Some(size) = self.header_size {
            config.header_size = size;
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

/// Validate the directory described by `overrides`.
pub fn validate(overrides: &Overrides) -> Result<ValidationReport, ToolError> {
    let config = overrides.resolve()?;
    let engine = ValidationEngine::from_config(config)?;
    Ok(engine.run()?)
}

/// Render a report in the requested format.
pub fn render_report(report: &ValidationReport, format: OutputFormat) -> Result<String, ToolError> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => Ok(report.to_json()? + "\n"),
    }
}

#[derive(Serialize)]
struct ChecklistRow<'a> {
    device: &'a str,
    activity: &'a str,
    subtype: &'a str,
}

/// Render a checklist, one entry per line or as JSON.
pub fn render_checklist(
    checklist: &ChecklistMatrix,
    format: OutputFormat,
) -> Result<String, ToolError> {
    match format {
        OutputFormat::Text => {
            let mut out: String = checklist
                .enumerate()
                .map(|entry| format!("{entry}\n"))
                .collect();
            out.push_str(&format!(
                "{} entries, {} files expected\n",
                checklist.len(),
                checklist.expected_file_count()
            ));
            Ok(out)
        }
        OutputFormat::Json => {
            let rows: Vec<_> = checklist
                .enumerate()
                .map(|e| ChecklistRow {
                    device: e.device.as_str(),
                    activity: &e.activity,
                    subtype: &e.subtype,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)? + "\n")
        }
    }
}

/// Process exit code for a finished run: 0 when clean, 1 with findings.
#[must_use]
pub fn exit_code(report: &ValidationReport) -> u8 {
    u8::from(!report.is_clean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rec_test_utils::fixtures::{reference_dataset, reference_name};

    #[test]
    fn test_resolve_requires_directory() {
        let err = Overrides::default().resolve().unwrap_err();
        assert!(matches!(err, ToolError::MissingDataDir));
    }

    #[test]
    fn test_resolve_config_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("validate.ron");
        std::fs::write(&config_path, "(parallel: true)").unwrap();

        let overrides = Overrides {
            config: Some(config_path.clone()),
            ..Overrides::default()
        };
        assert!(matches!(overrides.resolve(), Err(ToolError::MissingDataDir)));

        let overrides = Overrides {
            config: Some(config_path),
            data_dir: Some(PathBuf::from("recordings/s1")),
            ..Overrides::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("recordings/s1"));
        assert!(config.parallel);
    }

    #[test]
    fn test_resolve_cli_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("validate.ron");
        std::fs::write(&config_path, r#"(data_dir: "from-config", header_size: 3)"#).unwrap();

        let overrides = Overrides {
            config: Some(config_path.clone()),
            ..Overrides::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("from-config"));
        assert_eq!(config.header_size, 3);
        assert!(!config.parallel);

        let overrides = Overrides {
            config: Some(config_path),
            data_dir: Some(PathBuf::from("from-cli")),
            header_size: Some(7),
            parallel: true,
            ..Overrides::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("from-cli"));
        assert_eq!(config.header_size, 7);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_reference_dataset() {
        let (dir, _) = reference_dataset();
        let overrides = Overrides {
            data_dir: Some(dir.path().to_path_buf()),
            ..Overrides::default()
        };
        let report = validate(&overrides).unwrap();
        assert_eq!(exit_code(&report), 0);
        assert_eq!(
            render_report(&report, OutputFormat::Text).unwrap(),
            "0 finding(s) from 9 check(s) over 112 file(s)\n"
        );
    }

    #[test]
    fn test_findings_set_exit_code() {
        let (dir, _) = reference_dataset();
        let name = reference_name("Thingy", "Running", "Normal", "unprocessed");
        std::fs::remove_file(dir.path().join(name)).unwrap();

        let report = validate(&Overrides {
            data_dir: Some(dir.path().to_path_buf()),
            ..Overrides::default()
        })
        .unwrap();
        assert_eq!(exit_code(&report), 1);

        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files_scanned"], 111);
        assert_eq!(value["findings"][0]["check"], "file-count");
    }

    #[test]
    fn test_validate_missing_directory() {
        let err = validate(&Overrides {
            data_dir: Some(PathBuf::from("/nonexistent/recordings")),
            ..Overrides::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Validation(ValidationError::DirectoryUnreadable { .. })
        ));
    }

    #[test]
    fn test_render_checklist() {
        let checklist = ChecklistMatrix::reference();
        let text = render_checklist(&checklist, OutputFormat::Text).unwrap();
        assert!(text.starts_with("(Respeck, Sitting, Normal)\n"));
        assert!(text.ends_with("56 entries, 112 files expected\n"));

        let json = render_checklist(&checklist, OutputFormat::Json).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 56);
        assert_eq!(rows[12]["device"], "Thingy");
    }
}
