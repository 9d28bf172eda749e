//! Recording filename decoding.
//!
//! Recordings are named
//! `<Device>_s<id>_<Activity>_<Subtype>_<clean|unprocessed>_<DD-MM-YYYY>_<HH-MM-SS>.csv`,
//! for example `Respeck_s1_Lying down back_Coughing_clean_04-10-2023_14-30-05.csv`.
//!
//! Activity and subtype may contain letters and spaces only. Underscores in
//! either would shift every later field, so they are not supported by the
//! scheme; the closed activity vocabulary never contains one.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistEntry;
use crate::error::FilenameError;

const FILENAME_PATTERN: &str = concat!(
    r"^(Thingy|Respeck)_(s\d+)_([a-zA-Z ]+)_([a-zA-Z ]+)_(unprocessed|clean)_",
    r"([0-9]{2}-[0-9]{2}-[0-9]{4}_[0-9]{2}-[0-9]{2}-[0-9]{2})\.csv$",
);

/// Layout of the date-time suffix, e.g. `04-10-2023_14-30-05`.
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";

/// Minimum number of underscore-delimited fields before the pattern is tried.
const MIN_FIELDS: usize = 5;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(FILENAME_PATTERN).expect("filename pattern is valid"))
}

/// Sensor that produced a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Device {
    /// Respeck chest-worn respiratory sensor.
    Respeck,
    /// Nordic Thingy motion sensor.
    Thingy,
}

impl Device {
    /// Token used for this device in filenames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Respeck => "Respeck",
            Self::Thingy => "Thingy",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Respeck" => Ok(Self::Respeck),
            "Thingy" => Ok(Self::Thingy),
            other => Err(format!("unknown device '{other}'")),
        }
    }
}

/// Processing state of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    /// Trimmed and cleaned recording.
    Clean,
    /// Raw recording as captured.
    Unprocessed,
}

impl RecordingStatus {
    /// Token used for this status in filenames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Unprocessed => "unprocessed",
        }
    }

    /// The status a paired recording must carry.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Clean => Self::Unprocessed,
            Self::Unprocessed => Self::Clean,
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully decoded recording filename.
///
/// Only produced by [`parse`] on a complete pattern match, so every field is
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedFilename {
    /// Recording device.
    pub device: Device,
    /// Subject identifier including its `s` prefix, e.g. `s12`.
    pub subject_id: String,
    /// Activity performed, e.g. `Lying down back`.
    pub activity: String,
    /// Activity subtype, e.g. `Coughing`.
    pub subtype: String,
    /// Clean or unprocessed.
    pub status: RecordingStatus,
    /// Date-time suffix as written, `DD-MM-YYYY_HH-MM-SS`.
    pub timestamp: String,
}

impl ParsedFilename {
    /// Whether this recording belongs to the given checklist triple.
    #[must_use]
    pub fn matches(&self, device: Device, activity: &str, subtype: &str) -> bool {
        self.device == device && self.activity == activity && self.subtype == subtype
    }

    /// Checklist key of this recording.
    #[must_use]
    pub fn triple(&self) -> ChecklistEntry {
        ChecklistEntry::new(self.device, self.activity.clone(), self.subtype.clone())
    }

    /// Canonical filename of this recording with `status` substituted.
    #[must_use]
    pub fn with_status(&self, status: RecordingStatus) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}.csv",
            self.device, self.subject_id, self.activity, self.subtype, status, self.timestamp
        )
    }

    /// Filename of the clean/unprocessed partner of this recording.
    #[must_use]
    pub fn counterpart_name(&self) -> String {
        self.with_status(self.status.counterpart())
    }

    /// Start time from the filename, if it is a real calendar date-time.
    #[must_use]
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Decode a recording filename.
///
/// # Errors
///
/// Returns [`FilenameError::TooFewFields`] when the name has fewer than five
/// underscore-delimited fields and [`FilenameError::PatternMismatch`] when it
/// otherwise fails the naming scheme.
pub fn parse(name: &str) -> Result<ParsedFilename, FilenameError> {
    let found = name.split('_').count();
    if found < MIN_FIELDS {
        return Err(FilenameError::TooFewFields {
            name: name.to_string(),
            found,
        });
    }

    let caps = pattern()
        .captures(name)
        .ok_or_else(|| FilenameError::PatternMismatch(name.to_string()))?;

    let device = match &caps[1] {
        "Respeck" => Device::Respeck,
        _ => Device::Thingy,
    };
    let status = match &caps[5] {
        "clean" => RecordingStatus::Clean,
        _ => RecordingStatus::Unprocessed,
    };

    Ok(ParsedFilename {
        device,
        subject_id: caps[2].to_string(),
        activity: caps[3].to_string(),
        subtype: caps[4].to_string(),
        status,
        timestamp: caps[6].to_string(),
    })
}
