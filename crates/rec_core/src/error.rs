//! Error types for recording validation.
//!
//! Per-file problems (bad names, malformed headers, unreadable sample
//! tables) are recoverable: the checks turn them into report findings.
//! Only [`ValidationError`] can end a run.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Fatal errors that stop a validation run before any check executes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The input directory could not be listed.
    #[error("Cannot read recording directory '{path}': {source}")]
    DirectoryUnreadable {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("Failed to load config '{path}': {message}")]
    ConfigLoad {
        /// Path to the config file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A checklist file could not be read or parsed.
    #[error("Failed to load checklist '{path}': {message}")]
    ChecklistLoad {
        /// Path to the checklist file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A checklist definition listed the same triple twice.
    #[error("Duplicate checklist entry: {0}")]
    DuplicateChecklistEntry(String),
}

/// A filename that does not follow the recording naming scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    /// Fewer underscore-delimited fields than the scheme requires.
    #[error("'{name}' has {found} underscore-delimited fields, expected at least 5")]
    TooFewFields {
        /// The offending filename.
        name: String,
        /// Number of fields found.
        found: usize,
    },

    /// Enough fields, but the name does not match the pattern.
    #[error("'{0}' does not match the naming scheme")]
    PatternMismatch(String),
}

impl FilenameError {
    /// The filename that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::TooFewFields { name, .. } | Self::PatternMismatch(name) => name,
        }
    }
}

/// A recording header that cannot be decoded.
///
/// Recoverable: the recording is then treated as headerless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderFormatError {
    /// The file ended before the full header was read.
    #[error("header truncated: expected {expected} lines, found {found}")]
    Truncated {
        /// Configured header size.
        expected: usize,
        /// Lines actually present.
        found: usize,
    },

    /// A header line does not start with the comment marker.
    #[error("header line {line} is not a comment: {content:?}")]
    MissingCommentMarker {
        /// 1-based line number.
        line: usize,
        /// Raw line content.
        content: String,
    },

    /// A header line has no `Title: value` pair.
    #[error("header line {line} has no 'Title: value' pair: {content:?}")]
    MissingSeparator {
        /// 1-based line number.
        line: usize,
        /// Raw line content.
        content: String,
    },

    /// The file could not be read at all.
    #[error("header unreadable: {0}")]
    Unreadable(String),
}

/// The sample table of a recording could not be loaded.
#[derive(Debug, Error)]
pub enum SampleReadError {
    /// The file could not be opened or read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path to the recording.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The table body is not valid CSV.
    #[error("malformed table in '{path}': {source}")]
    Csv {
        /// Path to the recording.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The required timestamp column is absent.
    #[error("'{path}' has no '{column}' column")]
    MissingColumn {
        /// Path to the recording.
        path: PathBuf,
        /// Name of the missing column.
        column: String,
    },

    /// A timestamp cell is not a number.
    #[error("'{path}' row {row}: invalid timestamp {value:?}")]
    InvalidTimestamp {
        /// Path to the recording.
        path: PathBuf,
        /// 1-based data row number.
        row: usize,
        /// Raw cell content.
        value: String,
    },
}
