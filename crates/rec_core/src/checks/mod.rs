//! The validation checks.
//!
//! Every check is an independent pass over the same discovered file list.
//! Checks never fail: problems become [`Finding`]s and the run continues.
//!
//! New checks (device orientation sanity, duplicate timestamps, ...) plug in
//! by implementing [`Check`] and registering with
//! [`ValidationEngine::register`](crate::engine::ValidationEngine::register).

mod activity;
mod naming;
mod samples;

pub use activity::{
    DuplicateActivityCheck, ExtraActivityCheck, MissingActivityCheck, PairingCheck,
    SingleSubjectCheck,
};
pub use naming::{FileCountCheck, NamingSchemeCheck};
pub use samples::{FrequencyCheck, LengthCheck};

use crate::checklist::ChecklistMatrix;
use crate::config::ValidationConfig;
use crate::discovery::RecordingFile;
use crate::error::SampleReadError;
use crate::filename::ParsedFilename;
use crate::report::Finding;
use crate::summary::RecordingSummary;

/// Read-only inputs shared by every check of a run.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Discovered recordings, sorted by filename.
    pub files: &'a [RecordingFile],
    /// Expected recordings.
    pub checklist: &'a ChecklistMatrix,
    /// Run settings.
    pub config: &'a ValidationConfig,
}

impl<'a> CheckContext<'a> {
    /// Recordings whose names follow the naming scheme.
    pub fn parsed(&self) -> impl Iterator<Item = (&'a RecordingFile, &'a ParsedFilename)> + 'a {
        self.files
            .iter()
            .filter_map(|file| file.parsed().map(|parsed| (file, parsed)))
    }

    /// Read a recording's samples fresh from disk.
    pub fn load_summary(&self, file: &RecordingFile) -> Result<RecordingSummary, SampleReadError> {
        RecordingSummary::load(&file.path, &self.config.summary_options())
    }
}

/// A validation pass over the discovered recordings.
pub trait Check: Send + Sync {
    /// Short kebab-case name, used to prefix findings.
    fn name(&self) -> &str;

    /// Run the check and return its findings in a stable order.
    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// The standard battery, in reporting order.
#[must_use]
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(NamingSchemeCheck),
        Box::new(FileCountCheck),
        Box::new(ExtraActivityCheck),
        Box::new(MissingActivityCheck),
        Box::new(FrequencyCheck),
        Box::new(LengthCheck),
        Box::new(DuplicateActivityCheck),
        Box::new(SingleSubjectCheck),
        Box::new(PairingCheck),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use super::*;

    /// Build a listing from bare names; the files need not exist.
    pub fn listing(names: &[&str]) -> Vec<RecordingFile> {
        names
            .iter()
            .map(|name| RecordingFile::new(Path::new("/unused"), *name))
            .collect()
    }

    /// Run one check over `files` with the reference checklist.
    pub fn run_check(check: &dyn Check, files: &[RecordingFile]) -> Vec<Finding> {
        let checklist = ChecklistMatrix::reference();
        let config = ValidationConfig::default();
        check.run(&CheckContext {
            files,
            checklist: &checklist,
            config: &config,
        })
    }
}
