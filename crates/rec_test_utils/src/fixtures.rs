//! Test fixtures and helpers.
//!
//! Writes synthetic recordings that follow the collection protocol, so
//! tests can start from a passing dataset and break one thing at a time.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rec_core::checklist::{ChecklistEntry, ChecklistMatrix};
use tempfile::TempDir;

/// Subject id used by the reference dataset.
pub const SUBJECT: &str = "s1";

/// Epoch milliseconds of the first sample in every fixture.
pub const START_MS: u64 = 1_696_430_000_000;

/// Rows of a nominal clean recording: 30 s at 25 Hz.
pub const NOMINAL_ROWS: u64 = 750;

/// Time covered by a nominal recording, in milliseconds.
pub const NOMINAL_SPAN_MS: u64 = 30_000;

/// Shape of a synthetic sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Samples {
    /// Number of data rows.
    pub rows: u64,
    /// Milliseconds from the first to the last row.
    pub span_ms: u64,
}

impl Samples {
    /// 25 Hz for 30 s.
    pub const NOMINAL: Self = Self {
        rows: NOMINAL_ROWS,
        span_ms: NOMINAL_SPAN_MS,
    };

    /// Rows evenly spread over `span_ms`.
    #[must_use]
    pub const fn new(rows: u64, span_ms: u64) -> Self {
        Self { rows, span_ms }
    }
}

/// Canonical filename for a recording.
#[must_use]
pub fn recording_name(
    device: &str,
    subject: &str,
    activity: &str,
    subtype: &str,
    status: &str,
    timestamp: &str,
) -> String {
    format!("{device}_{subject}_{activity}_{subtype}_{status}_{timestamp}.csv")
}

/// Filename suffix for the `index`-th recording of a session.
#[must_use]
pub fn session_timestamp(index: usize) -> String {
    format!("04-10-2023_{:02}-{:02}-00", 9 + index / 60, index % 60)
}

/// Header block for an entry.
#[must_use]
pub fn header_block(device: &str, activity: &str, subtype: &str, subject: &str) -> String {
    format!(
        "# Sensor type: {device}\n# Activity type: {activity}\n\
         # Activity subtype: {subtype}\n# Subject id: {subject}\n# Notes: \n"
    )
}

/// CSV table with a `timestamp` column and three accelerometer columns.
#[must_use]
pub fn sample_table(samples: Samples) -> String {
    let mut out = String::from("timestamp,accel_x,accel_y,accel_z\n");
    for i in 0..samples.rows {
        let offset = if samples.rows > 1 {
            i * samples.span_ms / (samples.rows - 1)
        } else {
            0
        };
        let _ = writeln!(out, "{},-0.0125,-0.9862,0.1042", START_MS + offset);
    }
    out
}

/// Write a recording with a header block and return its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_recording(dir: &Path, name: &str, header: &str, samples: Samples) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("{header}{}", sample_table(samples)))
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}

/// Write a recording without a header block and return its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_headerless_recording(dir: &Path, name: &str, samples: Samples) -> PathBuf {
    write_recording(dir, name, "", samples)
}

/// Write the clean and unprocessed recordings of one checklist entry.
///
/// Returns `(clean, unprocessed)` filenames.
pub fn write_entry_pair(
    dir: &Path,
    entry: &ChecklistEntry,
    subject: &str,
    timestamp: &str,
) -> (String, String) {
    let device = entry.device.as_str();
    let header = header_block(device, &entry.activity, &entry.subtype, subject);
    let names = ["clean", "unprocessed"].map(|status| {
        recording_name(
            device,
            subject,
            &entry.activity,
            &entry.subtype,
            status,
            timestamp,
        )
    });
    for name in &names {
        write_recording(dir, name, &header, Samples::NOMINAL);
    }
    let [clean, unprocessed] = names;
    (clean, unprocessed)
}

/// Write a complete, passing dataset for `checklist` into `dir`.
///
/// Returns all filenames written, clean before unprocessed per entry.
pub fn write_dataset(dir: &Path, checklist: &ChecklistMatrix) -> Vec<String> {
    checklist
        .enumerate()
        .enumerate()
        .flat_map(|(i, entry)| {
            let (clean, unprocessed) = write_entry_pair(dir, entry, SUBJECT, &session_timestamp(i));
            [clean, unprocessed]
        })
        .collect()
}

/// A temporary directory holding the full 112-file reference dataset.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
pub fn reference_dataset() -> (TempDir, Vec<String>) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let names = write_dataset(dir.path(), &ChecklistMatrix::reference());
    (dir, names)
}

/// Name of the reference dataset file for an entry and status.
///
/// # Panics
///
/// Panics if the entry is not part of the reference checklist.
#[must_use]
pub fn reference_name(device: &str, activity: &str, subtype: &str, status: &str) -> String {
    let index = ChecklistMatrix::reference()
        .enumerate()
        .position(|e| e.device.as_str() == device && e.activity == activity && e.subtype == subtype)
        .unwrap_or_else(|| panic!("({device}, {activity}, {subtype}) is not a reference entry"));
    recording_name(
        device,
        SUBJECT,
        activity,
        subtype,
        status,
        &session_timestamp(index),
    )
}
