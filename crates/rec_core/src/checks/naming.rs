//! Naming-scheme and file-count checks.

use super::{Check, CheckContext};
use crate::report::Finding;

/// Every filename must follow the naming scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingSchemeCheck;

impl NamingSchemeCheck {
    /// Report prefix.
    pub const NAME: &'static str = "naming-scheme";
}

impl Check for NamingSchemeCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.files
            .iter()
            .filter_map(|file| file.parsed.as_ref().err().map(|e| (file, e)))
            .map(|(file, e)| {
                tracing::debug!("{e}");
                Finding::new(
                    Self::NAME,
                    format!("File found with incorrect naming scheme: {}", file.name),
                )
                .with_file(file.name.clone())
            })
            .collect()
    }
}

/// The directory must hold one clean and one unprocessed file per entry.
///
/// Counts every discovered CSV, including badly named ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCountCheck;

impl FileCountCheck {
    /// Report prefix.
    pub const NAME: &'static str = "file-count";
}

impl Check for FileCountCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let found = ctx.files.len();
        let expected = ctx.checklist.expected_file_count();
        if found == expected {
            return Vec::new();
        }
        vec![Finding::new(
            Self::NAME,
            format!("Invalid number of files detected: {found}, expected {expected}"),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{listing, run_check};
    use super::*;

    #[test]
    fn test_naming_reports_each_bad_name_once() {
        let files = listing(&[
            "Respeck_s1_Sitting_Normal_clean_04-10-2023_14-30-05.csv",
            "respeck_s1_Sitting_Normal_clean_04-10-2023_14-30-05.csv",
            "notes.csv",
        ]);
        let findings = run_check(&NamingSchemeCheck, &files);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0].files,
            vec!["respeck_s1_Sitting_Normal_clean_04-10-2023_14-30-05.csv"]
        );
        assert_eq!(
            findings[1].message,
            "File found with incorrect naming scheme: notes.csv"
        );
        assert!(findings.iter().all(|f| f.check == "naming-scheme"));
    }

    #[test]
    fn test_file_count_counts_unparseable_files() {
        let findings = run_check(&FileCountCheck, &listing(&["a.csv", "b.csv"]));
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Invalid number of files detected: 2, expected 112"
        );
    }

    #[test]
    fn test_file_count_empty_directory() {
        let findings = run_check(&FileCountCheck, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains(": 0, expected 112"));
    }
}
