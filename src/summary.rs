//! Per-asset outcomes collected over a batch run.

use crate::{Error, FallbackReason, TranscodeOutcome};
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one asset.
#[derive(Debug)]
pub enum AssetStatus {
    /// Produced in the preferred format
    Complete(PathBuf),
    /// Produced, but kept uncompressed
    Fallback {
        path: PathBuf,
        reason: FallbackReason,
    },
    /// Not produced
    Failed(Error),
}

impl From<TranscodeOutcome> for AssetStatus {
    fn from(outcome: TranscodeOutcome) -> Self {
        match outcome {
            TranscodeOutcome::Transcoded { path } => AssetStatus::Complete(path),
            TranscodeOutcome::Fallback { path, reason } => AssetStatus::Fallback { path, reason },
        }
    }
}

#[derive(Debug)]
pub struct AssetReport {
    pub name: String,
    pub status: AssetStatus,
}

impl AssetReport {
    pub fn path(&self) -> Option<&Path> {
        match &self.status {
            AssetStatus::Complete(path) | AssetStatus::Fallback { path, .. } => Some(path),
            AssetStatus::Failed(_) => None,
        }
    }
}

/// Reports for every asset in a batch, in the order they were attempted.
#[derive(Debug, Default)]
pub struct BatchSummary {
    reports: Vec<AssetReport>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, status: AssetStatus) {
        self.reports.push(AssetReport {
            name: name.into(),
            status,
        });
    }

    pub fn reports(&self) -> &[AssetReport] {
        &self.reports
    }

    pub fn complete(&self) -> impl Iterator<Item = &AssetReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, AssetStatus::Complete(_)))
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &AssetReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, AssetStatus::Fallback { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssetReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, AssetStatus::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} asset(s): {} complete, {} fallback, {} failed",
            self.len(),
            self.complete().count(),
            self.fallbacks().count(),
            self.failures().count()
        )?;
        for report in &self.reports {
            match &report.status {
                AssetStatus::Complete(path) => {
                    writeln!(f, "  ok       {:<24} {}", report.name, path.display())?
                }
                AssetStatus::Fallback { path, reason } => writeln!(
                    f,
                    "  fallback {:<24} {} ({reason})",
                    report.name,
                    path.display()
                )?,
                AssetStatus::Failed(err) => writeln!(f, "  failed   {:<24} {err}", report.name)?,
            }
        }
        Ok(())
    }
}
