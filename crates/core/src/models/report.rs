use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three artifact forms produced from one investment snapshot.
///
/// All three render the same underlying numbers; only structure and
/// formatting differ. Fully reproducible for identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifacts {
    /// Date the report was generated for (carried into all artifacts)
    pub generated: NaiveDate,

    /// Plain-text summary for file download
    pub text: String,

    /// Self-contained HTML document for print/preview
    pub html: String,

    /// Tab-separated block table for clipboard paste
    pub table: String,
}

/// Observable lifecycle of a requested report.
///
/// There is no cancellation: closing the report view just discards the
/// result (back to Idle).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReportState {
    /// No report requested
    #[default]
    Idle,
    /// A job is in flight, built from a snapshot taken at start
    Generating,
    /// Artifacts are available
    Ready(ReportArtifacts),
}

impl ReportState {
    #[must_use]
    pub fn is_generating(&self) -> bool {
        matches!(self, ReportState::Generating)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, ReportState::Ready(_))
    }
}
