//! Checks that read each recording's samples.
//!
//! Files are read fresh for every check. A file whose table cannot be read
//! is reported once per check and skipped.

use super::{Check, CheckContext};
use crate::filename::RecordingStatus;
use crate::report::Finding;

/// Every recording must be sampled within the configured frequency band.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyCheck;

impl FrequencyCheck {
    /// Report prefix.
    pub const NAME: &'static str = "frequency";
}

impl Check for FrequencyCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let band = ctx.config.frequency_hz;
        let mut findings = Vec::new();

        for file in ctx.files {
            let summary = match ctx.load_summary(file) {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!("{e}");
                    findings.push(
                        Finding::new(Self::NAME, format!("Cannot read samples: {e}"))
                            .with_file(file.name.clone()),
                    );
                    continue;
                }
            };

            match summary.frequency_hz() {
                Some(hz) if band.contains(hz) => {
                    tracing::debug!("{}: {hz:.2} Hz", file.name);
                }
                Some(hz) => findings.push(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Invalid frequency detected: {hz} Hz for {} (expected {}-{} Hz)",
                            file.name, band.min, band.max
                        ),
                    )
                    .with_file(file.name.clone()),
                ),
                None => findings.push(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Undefined frequency for {}: {} sample(s) without advancing timestamps",
                            file.name, summary.stats.sample_count
                        ),
                    )
                    .with_file(file.name.clone()),
                ),
            }
        }

        findings
    }
}

/// Clean recordings must last within the configured length band.
///
/// Unprocessed recordings are not trimmed, so their length is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthCheck;

impl LengthCheck {
    /// Report prefix.
    pub const NAME: &'static str = "length";
}

impl Check for LengthCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let band = ctx.config.clean_length_seconds;
        let mut findings = Vec::new();

        for (file, _) in ctx
            .parsed()
            .filter(|(_, p)| p.status == RecordingStatus::Clean)
        {
            let summary = match ctx.load_summary(file) {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!("{e}");
                    findings.push(
                        Finding::new(Self::NAME, format!("Cannot read samples: {e}"))
                            .with_file(file.name.clone()),
                    );
                    continue;
                }
            };

            match summary.length_seconds() {
                Some(secs) if band.contains(secs) => {
                    tracing::debug!("{}: {secs:.2} s", file.name);
                }
                Some(secs) => findings.push(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Invalid length detected: {secs} s for {} (expected {}-{} s)",
                            file.name, band.min, band.max
                        ),
                    )
                    .with_file(file.name.clone()),
                ),
                None => findings.push(
                    Finding::new(
                        Self::NAME,
                        format!(
                            "Undefined length for {}: {} sample(s) without advancing timestamps",
                            file.name, summary.stats.sample_count
                        ),
                    )
                    .with_file(file.name.clone()),
                ),
            }
        }

        findings
    }
}
