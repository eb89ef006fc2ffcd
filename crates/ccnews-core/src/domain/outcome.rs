//! Per-file ingestion results.

use serde::{Deserialize, Serialize};

use super::record::CaptureRecord;

/// Whether a file made it through download and decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Failed {
        /// Why the file could not be ingested.
        reason: String,
    },
}

/// Result of ingesting one capture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub file_id: String,
    pub records: Vec<CaptureRecord>,
    pub status: OutcomeStatus,
    /// Bytes received from the network.
    pub bytes_downloaded: u64,
    /// Records decoded but rejected by the validity predicate.
    pub skipped_records: usize,
    /// Valid records whose processing failed.
    pub failed_records: usize,
}

impl IngestionOutcome {
    /// A completed file.
    #[must_use]
    pub const fn succeeded(file_id: String, records: Vec<CaptureRecord>) -> Self {
        Self {
            file_id,
            records,
            status: OutcomeStatus::Succeeded,
            bytes_downloaded: 0,
            skipped_records: 0,
            failed_records: 0,
        }
    }

    /// A file that could not be downloaded.
    pub fn failed(file_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            records: Vec::new(),
            status: OutcomeStatus::Failed {
                reason: reason.into(),
            },
            bytes_downloaded: 0,
            skipped_records: 0,
            failed_records: 0,
        }
    }

    #[must_use]
    pub const fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes_downloaded = bytes;
        self
    }

    #[must_use]
    pub const fn with_record_counts(mut self, skipped: usize, failed: usize) -> Self {
        self.skipped_records = skipped;
        self.failed_records = failed;
        self
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded)
    }

    /// Failure reason, if the file failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Succeeded => None,
            OutcomeStatus::Failed { reason } => Some(reason),
        }
    }
}

/// Totals across one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub records: usize,
    pub records_with_content: usize,
    pub bytes_downloaded: u64,
}

impl RunSummary {
    /// Fold a set of outcomes into totals.
    #[must_use]
    pub fn from_outcomes(outcomes: &[IngestionOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            if outcome.is_success() {
                acc.files_succeeded += 1;
            } else {
                acc.files_failed += 1;
            }
            acc.records += outcome.records.len();
            acc.records_with_content += outcome
                .records
                .iter()
                .filter(|r| r.has_content())
                .count();
            acc.bytes_downloaded += outcome.bytes_downloaded;
            acc
        })
    }
}
