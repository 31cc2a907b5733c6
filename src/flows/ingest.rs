//! Ingest worker - folds one source's words into the shared table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::core::error::CountError;
use crate::core::model::SourceReport;
use crate::core::source::InputSource;
use crate::core::table::WordTable;
use crate::core::tokenizer::TokenizerConfig;

/// What happens to a source's counts when reading it fails part way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialPolicy {
    /// Words counted before the failure stay in the table
    #[default]
    Keep,
    /// The source contributes nothing unless it is read to the end
    Discard,
}

/// Per-worker settings, shared read-only by every worker of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub tokenizer: TokenizerConfig,
    pub partial: PartialPolicy,
}

/// Why ingestion stopped early, and how many of its words the table kept
#[derive(Debug)]
pub struct IngestFailure {
    pub retained: u64,
    pub error: CountError,
}

/// Fold `tokens` into `table`, one increment per token, in order.
///
/// Returns the number of words added to the table. `progress` tracks the same
/// number as it grows, so it stays accurate if the token source panics.
pub fn ingest_tokens<I>(
    tokens: I,
    table: &WordTable,
    source_name: &str,
    partial: PartialPolicy,
    progress: &AtomicU64,
) -> Result<u64, IngestFailure>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    match partial {
        PartialPolicy::Keep => ingest_direct(tokens, table, source_name, progress),
        PartialPolicy::Discard => ingest_staged(tokens, table, source_name, progress),
    }
}

fn ingest_direct<I>(
    tokens: I,
    table: &WordTable,
    source_name: &str,
    progress: &AtomicU64,
) -> Result<u64, IngestFailure>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut counted = 0u64;
    for token in tokens {
        let word = token.map_err(|error| IngestFailure {
            retained: counted,
            error: read_failure(source_name, counted, error),
        })?;
        table
            .increment_or_insert(&word)
            .map_err(|error| IngestFailure {
                retained: counted,
                error,
            })?;
        counted += 1;
        progress.fetch_add(1, Ordering::Relaxed);
    }
    Ok(counted)
}

// Tallies privately and touches the shared table only after the whole
// source was read. The merge is all-or-nothing.
fn ingest_staged<I>(
    tokens: I,
    table: &WordTable,
    source_name: &str,
    progress: &AtomicU64,
) -> Result<u64, IngestFailure>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut tally: HashMap<String, u64> = HashMap::new();
    let mut read = 0u64;
    for token in tokens {
        let word = token.map_err(|error| IngestFailure {
            retained: 0,
            error: read_failure(source_name, read, error),
        })?;
        *tally.entry(word).or_insert(0) += 1;
        read += 1;
    }

    let merged = table
        .merge(tally)
        .map_err(|error| IngestFailure { retained: 0, error })?;
    progress.fetch_add(merged, Ordering::Relaxed);
    Ok(merged)
}

fn read_failure(source_name: &str, counted: u64, error: io::Error) -> CountError {
    CountError::SourceReadFailure {
        source_name: source_name.to_string(),
        counted,
        error,
    }
}

/// Open `source`, tokenize it and count its words into `table`.
///
/// Never fails outright: every problem is recorded in the returned report.
pub fn ingest_source<S>(source: &S, table: &WordTable, options: &IngestOptions) -> SourceReport
where
    S: InputSource + ?Sized,
{
    ingest_source_tracked(source, table, options, &AtomicU64::new(0))
}

/// Like [`ingest_source`], also publishing the words kept so far to `progress`
pub fn ingest_source_tracked<S>(
    source: &S,
    table: &WordTable,
    options: &IngestOptions,
    progress: &AtomicU64,
) -> SourceReport
where
    S: InputSource + ?Sized,
{
    let started = Instant::now();
    let name = source.name();

    let report = match source.open() {
        Err(error) => {
            let error = CountError::SourceUnavailable {
                source_name: name.clone(),
                error,
            };
            SourceReport::failed(name, 0, &error)
        }
        Ok(reader) => {
            let words = options.tokenizer.words(reader);
            match ingest_tokens(words, table, &name, options.partial, progress) {
                Ok(counted) => SourceReport::ok(name, counted),
                Err(failure) => SourceReport::failed(name, failure.retained, &failure.error),
            }
        }
    };

    report.with_elapsed_ms(started.elapsed().as_millis() as u64)
}
