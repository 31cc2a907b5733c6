//! Run result model
//!
//! Every worker maps its outcome to a `SourceReport`; the CLI layer decides
//! what a failed source means for the process.

use serde::{Deserialize, Serialize};

use crate::core::error::CountError;

/// Serializable error information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CountError> for ErrorInfo {
    fn from(err: &CountError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// How ingestion of a single source ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Ok,
    Failed,
}

/// Outcome of one worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source name as given (`<stdin>` for standard input)
    pub source: String,

    pub status: SourceStatus,

    /// Words counted from this source that remain in the table
    pub words: u64,

    pub elapsed_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl SourceReport {
    pub fn ok(source: impl Into<String>, words: u64) -> Self {
        Self {
            source: source.into(),
            status: SourceStatus::Ok,
            words,
            elapsed_ms: 0,
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, words: u64, error: &CountError) -> Self {
        Self {
            source: source.into(),
            status: SourceStatus::Failed,
            words,
            elapsed_ms: 0,
            error: Some(error.into()),
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == SourceStatus::Ok
    }
}

/// Totals across every source of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub sources: usize,
    pub failed: usize,
    pub words: u64,
    pub distinct: usize,
}

impl RunSummary {
    /// Summarize `reports`; `words` and `distinct` are the final table totals
    pub fn from_reports(reports: &[SourceReport], words: u64, distinct: usize) -> Self {
        Self {
            sources: reports.len(),
            failed: reports.iter().filter(|r| !r.is_ok()).count(),
            words,
            distinct,
        }
    }

    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}
