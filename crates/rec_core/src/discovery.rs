//! Recording discovery.
//!
//! Lists the CSV files of a directory once per run and decodes their names.

use std::path::{Path, PathBuf};

use crate::error::{FilenameError, Result, ValidationError};
use crate::filename::{self, ParsedFilename};

/// A discovered recording file and the outcome of decoding its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFile {
    /// Filename including extension.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Decoded filename, or why it could not be decoded.
    pub parsed: std::result::Result<ParsedFilename, FilenameError>,
}

impl RecordingFile {
    /// Describe a file `name` inside `dir`.
    pub fn new(dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: dir.join(&name),
            parsed: filename::parse(&name),
            name,
        }
    }

    /// Describe the file at `path`.
    ///
    /// `path` is kept as given; only `name` is lossily converted to UTF-8.
    pub fn at(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            parsed: filename::parse(&name),
            name,
            path,
        }
    }

    /// The decoded filename, if it follows the naming scheme.
    #[must_use]
    pub fn parsed(&self) -> Option<&ParsedFilename> {
        self.parsed.as_ref().ok()
    }
}

/// Whether `name` has a `.csv` extension, in any case.
#[must_use]
pub fn is_csv_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// List the CSV recordings of `dir`, sorted by filename.
///
/// Subdirectories and other files are ignored. Entries that cannot be
/// inspected are logged and skipped; only an unreadable `dir` is an error.
pub fn discover_recordings(dir: &Path) -> Result<Vec<RecordingFile>> {
    let entries = std::fs::read_dir(dir).map_err(|source| ValidationError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_csv_name(&name) {
            tracing::trace!("Ignoring non-CSV entry {name}");
            continue;
        }
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => continue,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Skipping {name}: {e}");
                continue;
            }
        }
        files.push(RecordingFile::at(entry.path()));
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("Discovered {} recordings in {}", files.len(), dir.display());
    Ok(files)
}
