//! Error kinds raised while counting
//!
//! Every variant is scoped to one source. None of them aborts a run: the
//! scheduler turns them into failed [`SourceReport`](crate::core::model::SourceReport)s.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountError {
    /// The source could not be opened for reading
    #[error("cannot open {source_name}: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: io::Error,
    },

    /// An I/O error interrupted a source after `counted` words were read
    #[error("read failed on {source_name} after {counted} words: {error}")]
    SourceReadFailure {
        source_name: String,
        counted: u64,
        #[source]
        error: io::Error,
    },

    /// The table could not grow to hold a new word
    #[error("out of memory while inserting a {word_len}-byte word")]
    AllocationFailure { word_len: usize },

    #[error("worker for {source_name} panicked: {message}")]
    WorkerPanicked {
        source_name: String,
        message: String,
    },

    #[error("could not start a worker for {source_name}: {error}")]
    WorkerSpawnFailed {
        source_name: String,
        #[source]
        error: io::Error,
    },
}

impl CountError {
    /// Stable machine-readable code, used in summaries
    pub fn code(&self) -> &'static str {
        match self {
            CountError::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            CountError::SourceReadFailure { .. } => "SOURCE_READ_FAILURE",
            CountError::AllocationFailure { .. } => "ALLOCATION_FAILURE",
            CountError::WorkerPanicked { .. } => "WORKER_PANICKED",
            CountError::WorkerSpawnFailed { .. } => "WORKER_SPAWN_FAILED",
        }
    }
}
