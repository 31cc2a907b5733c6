//! Scheduler - one worker per source, then a join barrier
//!
//! Workers run on scoped threads and borrow the table, the sources and the
//! options directly. Every handle is joined before `count_sources` returns,
//! so the caller may treat the table as quiescent afterwards.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crate::core::error::CountError;
use crate::core::model::SourceReport;
use crate::core::source::InputSource;
use crate::core::table::WordTable;
use crate::flows::ingest::{ingest_source, ingest_source_tracked, IngestOptions};

/// Count every source into `table`.
///
/// With no sources, `default` (normally standard input) is read on the
/// calling thread. Reports come back in the order of `sources`.
pub fn count_sources<S: InputSource>(
    sources: &[S],
    default: &dyn InputSource,
    table: &WordTable,
    options: &IngestOptions,
) -> Vec<SourceReport> {
    if sources.is_empty() {
        return vec![ingest_source(default, table, options)];
    }
    count_concurrently(sources, table, options)
}

fn count_concurrently<S: InputSource>(
    sources: &[S],
    table: &WordTable,
    options: &IngestOptions,
) -> Vec<SourceReport> {
    // Words each worker has left in the table, readable after a panic
    let progress: Vec<AtomicU64> = sources.iter().map(|_| AtomicU64::new(0)).collect();

    thread::scope(|scope| {
        // Start every worker before joining any of them.
        let spawned: Vec<_> = sources
            .iter()
            .zip(&progress)
            .enumerate()
            .map(|(index, (source, kept))| {
                let handle = thread::Builder::new()
                    .name(format!("pwords-{}", index))
                    .spawn_scoped(scope, move || {
                        ingest_source_tracked(source, table, options, kept)
                    });
                (source, kept, handle)
            })
            .collect();

        spawned
            .into_iter()
            .map(|(source, kept, handle)| match handle {
                Ok(handle) => handle.join().unwrap_or_else(|payload| {
                    let error = CountError::WorkerPanicked {
                        source_name: source.name(),
                        message: panic_message(payload.as_ref()),
                    };
                    SourceReport::failed(source.name(), kept.load(Ordering::Relaxed), &error)
                }),
                Err(error) => {
                    let error = CountError::WorkerSpawnFailed {
                        source_name: source.name(),
                        error,
                    };
                    SourceReport::failed(source.name(), 0, &error)
                }
            })
            .collect()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
