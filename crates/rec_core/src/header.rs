//! Recording header metadata.
//!
//! Recordings start with a block of comment lines describing the session:
//!
//! ```text
//! # Sensor type: Respeck
//! # Activity type: Sitting
//! # Activity subtype: Normal
//! # Subject id: s1
//! # Notes: None
//! ```
//!
//! Files without such a block are still valid; callers treat a
//! [`HeaderFormatError`] as "no metadata" and read the table from line 0.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HeaderFormatError;

/// Default number of header lines.
pub const DEFAULT_HEADER_SIZE: usize = 5;

const COMMENT_MARKER: char = '#';

/// Descriptive metadata from a recording header.
///
/// Titles missing from the header leave their field `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    /// "Sensor type" value.
    pub sensor_type: Option<String>,
    /// "Activity type" value.
    pub activity_type: Option<String>,
    /// "Activity subtype" value.
    pub activity_subtype: Option<String>,
    /// "Subject id" value.
    pub subject_id: Option<String>,
    /// "Notes" value.
    pub notes: Option<String>,
}

/// Decode already-read header lines.
///
/// Every line must start with `#` and hold a `Title: value` pair; the value
/// is everything after the first colon. Unrecognised titles are skipped.
pub fn parse_header_lines<S: AsRef<str>>(lines: &[S]) -> Result<HeaderMetadata, HeaderFormatError> {
    let mut meta = HeaderMetadata::default();

    for (i, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let line = i + 1;
        let body = raw
            .trim_end()
            .strip_prefix(COMMENT_MARKER)
            .ok_or_else(|| HeaderFormatError::MissingCommentMarker {
                line,
                content: raw.to_string(),
            })?;
        let (title, value) = body
            .split_once(':')
            .ok_or_else(|| HeaderFormatError::MissingSeparator {
                line,
                content: raw.to_string(),
            })?;

        let value = Some(value.trim().to_string());
        match title.trim() {
            "Sensor type" => meta.sensor_type = value,
            "Activity type" => meta.activity_type = value,
            "Activity subtype" => meta.activity_subtype = value,
            "Subject id" => meta.subject_id = value,
            "Notes" => meta.notes = value,
            other => tracing::trace!("Ignoring header title {other:?}"),
        }
    }

    Ok(meta)
}

/// Decode the header from the leading lines of a recording.
///
/// `lines` may hold more than `header_size` lines; only the first
/// `header_size` are decoded.
pub fn parse_header<S: AsRef<str>>(
    lines: &[S],
    header_size: usize,
) -> Result<HeaderMetadata, HeaderFormatError> {
    if lines.len() < header_size {
        return Err(HeaderFormatError::Truncated {
            expected: header_size,
            found: lines.len(),
        });
    }
    parse_header_lines(&lines[..header_size])
}

/// Read and decode the first `header_size` lines of a recording.
pub fn read_header(path: &Path, header_size: usize) -> Result<HeaderMetadata, HeaderFormatError> {
    let file = File::open(path).map_err(|e| HeaderFormatError::Unreadable(e.to_string()))?;
    let lines = BufReader::new(file)
        .lines()
        .take(header_size)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| HeaderFormatError::Unreadable(e.to_string()))?;

    parse_header(&lines, header_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: [&str; 5] = [
        "# Sensor type: Respeck",
        "# Activity type: Sitting",
        "# Activity subtype: Normal",
        "# Subject id: s1",
        "# Notes: strap loose: re-tightened",
    ];

    #[test]
    fn test_parse_full_header() {
        let meta = parse_header_lines(&HEADER).unwrap();
        assert_eq!(meta.sensor_type.as_deref(), Some("Respeck"));
        assert_eq!(meta.activity_type.as_deref(), Some("Sitting"));
        assert_eq!(meta.activity_subtype.as_deref(), Some("Normal"));
        assert_eq!(meta.subject_id.as_deref(), Some("s1"));
        assert_eq!(meta.notes.as_deref(), Some("strap loose: re-tightened"));
    }

    #[test]
    fn test_unknown_titles_ignored() {
        let meta = parse_header_lines(&["# Firmware: 1.2", "# Subject id: s7"]).unwrap();
        assert_eq!(meta.subject_id.as_deref(), Some("s7"));
        assert_eq!(meta.sensor_type, None);
    }

    #[test]
    fn test_missing_comment_marker() {
        let err = parse_header_lines(&["# Sensor type: Respeck", "timestamp,x,y,z"]).unwrap_err();
        assert!(matches!(err, HeaderFormatError::MissingCommentMarker { line: 2, .. }));
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_header_lines(&["# just a comment"]).unwrap_err();
        assert!(matches!(err, HeaderFormatError::MissingSeparator { line: 1, .. }));
    }

    #[test]
    fn test_parse_header_uses_leading_lines() {
        let lines = ["# Sensor type: Thingy", "# Subject id: s3", "timestamp,a", "0,1"];
        let meta = parse_header(&lines, 2).unwrap();
        assert_eq!(meta.sensor_type.as_deref(), Some("Thingy"));
        assert_eq!(meta.subject_id.as_deref(), Some("s3"));

        assert_eq!(
            parse_header(&lines[..1], 2).unwrap_err(),
            HeaderFormatError::Truncated {
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            parse_header(&lines, 3),
            Err(HeaderFormatError::MissingCommentMarker { line: 3, .. })
        ));
    }

    #[test]
    fn test_read_header_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in HEADER {
            writeln!(file, "{line}").unwrap();
        }
        writeln!(file, "timestamp,accel_x").unwrap();
        writeln!(file, "0,0.1").unwrap();

        let meta = read_header(file.path(), DEFAULT_HEADER_SIZE).unwrap();
        assert_eq!(meta.sensor_type.as_deref(), Some("Respeck"));
    }

    #[test]
    fn test_read_header_truncated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# Sensor type: Thingy").unwrap();

        let err = read_header(file.path(), DEFAULT_HEADER_SIZE).unwrap_err();
        assert_eq!(
            err,
            HeaderFormatError::Truncated {
                expected: 5,
                found: 1
            }
        );
    }

    #[test]
    fn test_read_header_missing_file() {
        let err = read_header(Path::new("/nonexistent/recording.csv"), 5).unwrap_err();
        assert!(matches!(err, HeaderFormatError::Unreadable(_)));
    }
}
