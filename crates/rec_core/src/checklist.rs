//! The checklist of recordings a complete dataset must contain.
//!
//! Each entry is a `(device, activity, subtype)` triple that should appear
//! once as a clean recording and once as an unprocessed one. The matrix is
//! built once, either from the reference protocol or from a RON file, and
//! is never mutated afterwards.
//!
//! # Example RON
//!
//! ```ron
//! [
//!     (device: Respeck, activity: "Sitting", subtype: "Normal"),
//!     (device: Thingy, activity: "Sitting", subtype: "Normal"),
//! ]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::filename::Device;

/// Postures recorded with both devices under normal breathing.
const MOTION_ACTIVITIES: [&str; 12] = [
    "Sitting",
    "Standing",
    "Lying down on left",
    "Lying down right",
    "Lying down back",
    "Lying down on stomach",
    "Normal walking",
    "Ascending stairs",
    "Descending stairs",
    "Shuffle walking",
    "Running",
    "Miscellaneous movements",
];

/// Stationary postures used for the respiratory subtypes.
const STATIONARY_POSTURES: [&str; 6] = [
    "Sitting",
    "Standing",
    "Lying down back",
    "Lying down right",
    "Lying down on left",
    "Lying down on stomach",
];

/// Respeck-only `(activity, subtype)` pairs beyond the motion set.
const RESPECK_VOCAL_ENTRIES: [(&str, &str); 20] = [
    ("Sitting", "Talking"),
    ("Sitting", "Eating"),
    ("Sitting", "Singing"),
    ("Sitting", "Laughing"),
    ("Standing", "Talking"),
    ("Standing", "Eating"),
    ("Standing", "Singing"),
    ("Standing", "Laughing"),
    ("Lying down back", "Talking"),
    ("Lying down back", "Singing"),
    ("Lying down back", "Laughing"),
    ("Lying down right", "Talking"),
    ("Lying down right", "Singing"),
    ("Lying down right", "Laughing"),
    ("Lying down on left", "Talking"),
    ("Lying down on left", "Singing"),
    ("Lying down on left", "Laughing"),
    ("Lying down on stomach", "Talking"),
    ("Lying down on stomach", "Singing"),
    ("Lying down on stomach", "Laughing"),
];

/// One expected `(device, activity, subtype)` combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// Recording device.
    pub device: Device,
    /// Activity name as it appears in filenames.
    pub activity: String,
    /// Activity subtype as it appears in filenames.
    pub subtype: String,
}

impl ChecklistEntry {
    /// Create a new entry.
    pub fn new(device: Device, activity: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            device,
            activity: activity.into(),
            subtype: subtype.into(),
        }
    }
}

impl fmt::Display for ChecklistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.device, self.activity, self.subtype)
    }
}

/// Immutable set of expected recordings, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistMatrix {
    entries: Vec<ChecklistEntry>,
}

impl ChecklistMatrix {
    /// Build a matrix from entries, rejecting duplicates.
    pub fn from_entries(entries: impl IntoIterator<Item = ChecklistEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for entry in entries {
            if !seen.insert(entry.clone()) {
                return Err(ValidationError::DuplicateChecklistEntry(entry.to_string()));
            }
            ordered.push(entry);
        }
        Ok(Self { entries: ordered })
    }

    /// The reference data-collection protocol: 56 entries.
    #[must_use]
    pub fn reference() -> Self {
        let motion = [Device::Respeck, Device::Thingy].into_iter().flat_map(|device| {
            MOTION_ACTIVITIES
                .iter()
                .map(move |activity| ChecklistEntry::new(device, *activity, "Normal"))
        });
        let respiratory = ["Coughing", "Hyperventilating"].into_iter().flat_map(|subtype| {
            STATIONARY_POSTURES
                .iter()
                .map(move |posture| ChecklistEntry::new(Device::Respeck, *posture, subtype))
        });
        let vocal = RESPECK_VOCAL_ENTRIES
            .iter()
            .map(|(activity, subtype)| ChecklistEntry::new(Device::Respeck, *activity, *subtype));

        Self {
            entries: motion.chain(respiratory).chain(vocal).collect(),
        }
    }

    /// Parse a matrix from a RON list of entries.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let entries: Vec<ChecklistEntry> =
            ron::from_str(source).map_err(|e| ValidationError::ChecklistLoad {
                path: "<inline>".into(),
                message: e.to_string(),
            })?;
        Self::from_entries(entries)
    }

    /// Load a matrix from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ValidationError::ChecklistLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&source).map_err(|e| match e {
            ValidationError::ChecklistLoad { message, .. } => ValidationError::ChecklistLoad {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Whether the triple is part of the checklist.
    #[must_use]
    pub fn contains(&self, device: Device, activity: &str, subtype: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.device == device && e.activity == activity && e.subtype == subtype)
    }

    /// Whether the exact entry is part of the checklist.
    #[must_use]
    pub fn contains_entry(&self, entry: &ChecklistEntry) -> bool {
        self.contains(entry.device, &entry.activity, &entry.subtype)
    }

    /// All entries in declaration order.
    pub fn enumerate(&self) -> impl Iterator<Item = &ChecklistEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the matrix has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files a complete dataset holds: one clean and one unprocessed per entry.
    #[must_use]
    pub fn expected_file_count(&self) -> usize {
        self.entries.len() * 2
    }
}

impl Default for ChecklistMatrix {
    fn default() -> Self {
        Self::reference()
    }
}
