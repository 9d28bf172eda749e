//! Per-recording summaries: filename fields, header metadata and sample
//! statistics.
//!
//! A summary is built on demand by the checks that need sample data and is
//! dropped once that check has looked at it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SampleReadError;
use crate::filename::{self, ParsedFilename};
use crate::header::{parse_header, HeaderMetadata, DEFAULT_HEADER_SIZE};

/// Default name of the epoch-millisecond column.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "timestamp";

/// How to read a recording's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Number of comment lines before the table.
    pub header_size: usize,
    /// Column holding epoch-millisecond timestamps.
    pub timestamp_column: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            header_size: DEFAULT_HEADER_SIZE,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
        }
    }
}

/// Row count and timestamp bounds of a sample table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of data rows.
    pub sample_count: usize,
    /// Timestamp of the first row, in epoch milliseconds.
    pub first_timestamp_ms: Option<f64>,
    /// Timestamp of the last row, in epoch milliseconds.
    pub last_timestamp_ms: Option<f64>,
}

impl SampleStats {
    /// Collect stats from timestamps in row order.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::default();
        for ts in timestamps {
            stats.push(ts);
        }
        stats
    }

    fn push(&mut self, ts: f64) {
        if self.first_timestamp_ms.is_none() {
            self.first_timestamp_ms = Some(ts);
        }
        self.last_timestamp_ms = Some(ts);
        self.sample_count += 1;
    }

    /// Time between the first and last sample, in milliseconds.
    #[must_use]
    pub fn span_ms(&self) -> Option<f64> {
        Some(self.last_timestamp_ms? - self.first_timestamp_ms?)
    }

    /// Samples per second: `rows / (span / 1000)`.
    ///
    /// `None` when there are fewer than two rows or the timestamps do not
    /// advance.
    #[must_use]
    pub fn frequency_hz(&self) -> Option<f64> {
        if self.sample_count < 2 {
            return None;
        }
        let span = self.span_ms()?;
        if span <= 0.0 {
            return None;
        }
        let hz = self.sample_count as f64 / (span / 1000.0);
        hz.is_finite().then_some(hz)
    }

    /// Recording length in seconds: `rows / frequency`.
    #[must_use]
    pub fn length_seconds(&self) -> Option<f64> {
        self.frequency_hz().map(|hz| self.sample_count as f64 / hz)
    }
}

/// Everything known about one recording file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSummary {
    /// Filename including extension.
    pub file_name: String,
    /// Filename without extension.
    pub recording_id: String,
    /// Decoded filename, if it follows the naming scheme.
    pub parsed: Option<ParsedFilename>,
    /// Header metadata, if the header could be decoded.
    pub header: Option<HeaderMetadata>,
    /// Sample statistics.
    pub stats: SampleStats,
}

impl RecordingSummary {
    /// Read a recording and summarise it.
    ///
    /// A malformed header is not an error: the table is then read from the
    /// first line and `header` is `None`.
    pub fn load(path: &Path, options: &SummaryOptions) -> Result<Self, SampleReadError> {
        let content = std::fs::read_to_string(path).map_err(|source| SampleReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let recording_id = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let leading: Vec<&str> = content.lines().take(options.header_size).collect();
        let header = match parse_header(&leading, options.header_size) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::debug!("{file_name}: {e}, reading as headerless");
                None
            }
        };

        let body = if header.is_some() {
            let start: usize = content
                .split_inclusive('\n')
                .take(options.header_size)
                .map(str::len)
                .sum();
            &content[start..]
        } else {
            content.as_str()
        };

        let stats = read_sample_stats(path, body, &options.timestamp_column)?;

        Ok(Self {
            parsed: filename::parse(&file_name).ok(),
            file_name,
            recording_id,
            header,
            stats,
        })
    }

    /// Samples per second, if defined.
    #[must_use]
    pub fn frequency_hz(&self) -> Option<f64> {
        self.stats.frequency_hz()
    }

    /// Recording length in seconds, if defined.
    #[must_use]
    pub fn length_seconds(&self) -> Option<f64> {
        self.stats.length_seconds()
    }

    /// Wall-clock time of the last sample.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        let last = self.stats.last_timestamp_ms?;
        DateTime::from_timestamp_millis(last as i64)
    }
}

fn read_sample_stats(
    path: &Path,
    table: &str,
    column: &str,
) -> Result<SampleStats, SampleReadError> {
    let csv_error = |source: csv::Error| SampleReadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(table.as_bytes());

    let index = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SampleReadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut stats = SampleStats::default();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let cell = record.get(index).unwrap_or_default();
        let ts = cell
            .parse::<f64>()
            .ok()
            .filter(|ts| ts.is_finite())
            .ok_or_else(|| SampleReadError::InvalidTimestamp {
                path: path.to_path_buf(),
                row: i + 1,
                value: cell.to_string(),
            })?;
        stats.push(ts);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn table(rows: usize, step_ms: u64) -> String {
        let mut out = String::from("timestamp,accel_x,accel_y,accel_z\n");
        for i in 0..rows as u64 {
            out.push_str(&format!("{},0.1,0.2,0.9\n", 1_696_430_000_000 + i * step_ms));
        }
        out
    }

    const HEADER: &str = "# Sensor type: Respeck\n# Activity type: Sitting\n\
                          # Activity subtype: Normal\n# Subject id: s1\n# Notes: \n";

    #[test]
    fn test_stats_frequency_and_length() {
        let stats = SampleStats::from_timestamps([0.0, 40.0, 80.0, 120.0, 160.0]);
        assert_eq!(stats.sample_count, 5);
        assert_eq!(stats.span_ms(), Some(160.0));
        assert!((stats.frequency_hz().unwrap() - 31.25).abs() < 1e-9);
        assert!((stats.length_seconds().unwrap() - 0.16).abs() < 1e-9);
    }

    #[test]
    fn test_stats_degenerate() {
        assert_eq!(SampleStats::default().frequency_hz(), None);
        assert_eq!(SampleStats::from_timestamps([5.0]).frequency_hz(), None);
        assert_eq!(SampleStats::from_timestamps([5.0, 5.0]).frequency_hz(), None);
        assert_eq!(SampleStats::from_timestamps([9.0, 5.0]).frequency_hz(), None);
        assert_eq!(SampleStats::from_timestamps([5.0]).length_seconds(), None);
    }

    #[test]
    fn test_load_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let name = "Respeck_s1_Sitting_Normal_clean_04-10-2023_14-30-05.csv";
        let path = write_file(dir.path(), name, &format!("{HEADER}{}", table(750, 40)));

        let summary = RecordingSummary::load(&path, &SummaryOptions::default()).unwrap();
        assert_eq!(summary.file_name, name);
        assert_eq!(
            summary.recording_id,
            "Respeck_s1_Sitting_Normal_clean_04-10-2023_14-30-05"
        );
        assert_eq!(summary.stats.sample_count, 750);
        assert!(summary.parsed.is_some());
        let header = summary.header.as_ref().unwrap();
        assert_eq!(header.subject_id.as_deref(), Some("s1"));
        assert_eq!(header.notes.as_deref(), Some(""));

        let hz = summary.frequency_hz().unwrap();
        assert!(hz > 25.0 && hz < 25.1, "{hz}");
        let len = summary.length_seconds().unwrap();
        assert!((len - 29.96).abs() < 1e-6, "{len}");
    }

    #[test]
    fn test_load_headerless_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "plain.csv", &table(10, 40));

        let summary = RecordingSummary::load(&path, &SummaryOptions::default()).unwrap();
        assert!(summary.header.is_none());
        assert!(summary.parsed.is_none());
        assert_eq!(summary.stats.sample_count, 10);
    }

    #[test]
    fn test_load_short_file_is_headerless() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "short.csv", "timestamp,a\n0,1\n1000,1\n");

        let summary = RecordingSummary::load(&path, &SummaryOptions::default()).unwrap();
        assert!(summary.header.is_none());
        assert_eq!(summary.stats.sample_count, 2);
        assert_eq!(summary.frequency_hz(), Some(2.0));
    }

    #[test]
    fn test_load_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "x.csv", &format!("{HEADER}time,a\n1,2\n"));

        let err = RecordingSummary::load(&path, &SummaryOptions::default()).unwrap_err();
        assert!(matches!(err, SampleReadError::MissingColumn { ref column, .. } if column == "timestamp"));
    }

    #[test]
    fn test_load_invalid_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "x.csv",
            &format!("{HEADER}timestamp,a\n100,1\nlater,2\n"),
        );

        let err = RecordingSummary::load(&path, &SummaryOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SampleReadError::InvalidTimestamp { row: 2, ref value, .. } if value == "later"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RecordingSummary::load(
            Path::new("/nonexistent/x.csv"),
            &SummaryOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SampleReadError::Io { .. }));
    }

    #[test]
    fn test_custom_timestamp_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "x.csv", "time_ms,a\n0,1\n1000,1\n");
        let options = SummaryOptions {
            header_size: 0,
            timestamp_column: "time_ms".to_string(),
        };

        let summary = RecordingSummary::load(&path, &options).unwrap();
        assert_eq!(summary.frequency_hz(), Some(2.0));
    }

    #[test]
    fn test_ended_at() {
        let summary = RecordingSummary {
            file_name: "x.csv".to_string(),
            recording_id: "x".to_string(),
            parsed: None,
            header: None,
            stats: SampleStats::from_timestamps([0.0, 1_696_430_000_000.0]),
        };
        assert_eq!(
            summary.ended_at().unwrap().format("%Y-%m-%d_%H-%M-%S").to_string(),
            "2023-10-04_14-33-20"
        );
    }
}
