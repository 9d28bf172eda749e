//! Checks comparing decoded filenames against the checklist and each other.
//!
//! Badly named files are skipped here; the naming-scheme check reports them.

use std::collections::{BTreeSet, HashSet};

use super::{Check, CheckContext};
use crate::filename::RecordingStatus;
use crate::report::Finding;

/// Every recording must belong to a checklist entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraActivityCheck;

impl ExtraActivityCheck {
    /// Report prefix.
    pub const NAME: &'static str = "extra-activity";
}

impl Check for ExtraActivityCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.parsed()
            .filter(|(_, p)| !ctx.checklist.contains_entry(&p.triple()))
            .map(|(file, _)| {
                Finding::new(
                    Self::NAME,
                    format!("Unknown activity detected: {}", file.name),
                )
                .with_file(file.name.clone())
            })
            .collect()
    }
}

/// Every checklist entry must have at least one recording.
///
/// Either status satisfies an entry; pairing is checked separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingActivityCheck;

impl MissingActivityCheck {
    /// Report prefix.
    pub const NAME: &'static str = "missing-activity";
}

impl Check for MissingActivityCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.checklist
            .enumerate()
            .filter(|entry| {
                !ctx.parsed()
                    .any(|(_, p)| p.matches(entry.device, &entry.activity, &entry.subtype))
            })
            .map(|entry| Finding::new(Self::NAME, format!("Activity missing: {entry}")))
            .collect()
    }
}

/// No checklist entry may have more than one clean recording.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateActivityCheck;

impl DuplicateActivityCheck {
    /// Report prefix.
    pub const NAME: &'static str = "duplicate-activity";
}

impl Check for DuplicateActivityCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for entry in ctx.checklist.enumerate() {
            let clean: Vec<&str> = ctx
                .parsed()
                .filter(|(_, p)| {
                    p.status == RecordingStatus::Clean
                        && p.matches(entry.device, &entry.activity, &entry.subtype)
                })
                .map(|(file, _)| file.name.as_str())
                .collect();

            if clean.len() > 1 {
                findings.push(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Duplicate activity {entry}: {} clean recordings",
                            clean.len()
                        ),
                    )
                    .with_files(clean),
                );
            }
        }
        findings
    }
}

/// A dataset should come from a single subject.
///
/// Several distinct ids usually mean a typo in some filenames. The ids are
/// listed by their numeric part, so `s2` precedes `s10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSubjectCheck;

impl SingleSubjectCheck {
    /// Report prefix.
    pub const NAME: &'static str = "single-subject";
}

impl Check for SingleSubjectCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let ids: BTreeSet<&str> = ctx.parsed().map(|(_, p)| p.subject_id.as_str()).collect();
        if ids.len() <= 1 {
            return Vec::new();
        }

        let mut ids: Vec<&str> = ids.into_iter().collect();
        ids.sort_by_key(|id| (subject_number(id), *id));
        let listed = ids.join(", ");
        vec![Finding::new(
            Self::NAME,
            format!("More than one subject id detected, review files for typos: {{{listed}}}"),
        )]
    }
}

fn subject_number(id: &str) -> u64 {
    id.trim_start_matches('s').parse().unwrap_or(u64::MAX)
}

/// Every recording needs its clean/unprocessed partner.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingCheck;

impl PairingCheck {
    /// Report prefix.
    pub const NAME: &'static str = "clean-unprocessed-pair";
}

impl Check for PairingCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let present: HashSet<&str> = ctx.files.iter().map(|f| f.name.as_str()).collect();

        ctx.parsed()
            .filter_map(|(file, parsed)| {
                let partner = parsed.counterpart_name();
                if present.contains(partner.as_str()) {
                    return None;
                }
                Some(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Clean/unprocessed pair missing for {} (expected {partner})",
                            file.name
                        ),
                    )
                    .with_file(file.name.clone()),
                )
            })
            .collect()
    }
}
