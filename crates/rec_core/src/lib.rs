//! # Recording Validator Core
//!
//! Validation of sensor-recording datasets collected under a fixed
//! protocol. A dataset is a directory of CSV recordings; this crate checks
//! that it is complete, correctly named, free of duplicates and internally
//! consistent.
//!
//! The crate never modifies recordings.
//!
//! ## Crate Structure
//!
//! - [`filename`] - Recording filename decoding
//! - [`header`] - Header metadata extraction
//! - [`summary`] - Per-recording sample statistics
//! - [`checklist`] - The expected `(device, activity, subtype)` matrix
//! - [`checks`] - The individual validation passes
//! - [`engine`] - Discovery and check orchestration
//! - [`report`] - Findings and their rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod checklist;
pub mod checks;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod filename;
pub mod header;
pub mod report;
pub mod summary;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::checklist::{ChecklistEntry, ChecklistMatrix};
    pub use crate::checks::{Check, CheckContext};
    pub use crate::config::{Band, ValidationConfig};
    pub use crate::discovery::{discover_recordings, RecordingFile};
    pub use crate::engine::ValidationEngine;
    pub use crate::error::{
        FilenameError, HeaderFormatError, Result, SampleReadError, ValidationError,
    };
    pub use crate::filename::{Device, ParsedFilename, RecordingStatus};
    pub use crate::header::HeaderMetadata;
    pub use crate::report::{Finding, ValidationReport};
    pub use crate::summary::{RecordingSummary, SampleStats, SummaryOptions};
}
