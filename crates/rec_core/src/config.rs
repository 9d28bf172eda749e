//! Validation run configuration.
//!
//! One [`ValidationConfig`] describes one run: which directory to scan and
//! the bounds recordings must satisfy. It can be written as RON; missing
//! fields take their defaults.
//!
//! ```ron
//! (
//!     data_dir: "recordings/s1",
//!     frequency_hz: (min: 24.0, max: 26.0),
//!     parallel: true,
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistMatrix;
use crate::error::{Result, ValidationError};
use crate::header::DEFAULT_HEADER_SIZE;
use crate::summary::{SummaryOptions, DEFAULT_TIMESTAMP_COLUMN};

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl Band {
    /// Create a band.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the band, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Settings for a single validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Directory holding the recordings. Empty until one is configured.
    pub data_dir: PathBuf,
    /// Number of comment lines at the top of each recording.
    pub header_size: usize,
    /// Column holding epoch-millisecond timestamps.
    pub timestamp_column: String,
    /// Accepted sampling rate of every recording.
    pub frequency_hz: Band,
    /// Accepted duration of clean recordings.
    pub clean_length_seconds: Band,
    /// Run checks on a thread pool.
    pub parallel: bool,
    /// Alternative checklist (RON) replacing the reference protocol.
    pub checklist: Option<PathBuf>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            header_size: DEFAULT_HEADER_SIZE,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            frequency_hz: Band::new(24.0, 26.0),
            clean_length_seconds: Band::new(28.0, 32.0),
            parallel: false,
            checklist: None,
        }
    }
}

impl ValidationConfig {
    /// Default settings for the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a config from RON.
    pub fn from_ron_str(source: &str) -> std::result::Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    /// Load a config from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ValidationError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&source).map_err(|e| ValidationError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// How recordings are read for sample checks.
    #[must_use]
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            header_size: self.header_size,
            timestamp_column: self.timestamp_column.clone(),
        }
    }

    /// The configured checklist, or the reference one.
    pub fn load_checklist(&self) -> Result<ChecklistMatrix> {
        match &self.checklist {
            Some(path) => ChecklistMatrix::load(path),
            None => Ok(ChecklistMatrix::reference()),
        }
    }
}
