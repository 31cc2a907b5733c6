//! Count flow - a full run from sources to rendered report
//!
//! Ingest phase, join barrier, then the report. Per-source failures are
//! printed as diagnostics and returned in the outcome; only a failure to
//! write the report itself is an error of the run.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use crate::core::model::{RunSummary, SourceReport};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::source::InputSource;
use crate::core::table::WordTable;
use crate::flows::ingest::IngestOptions;
use crate::flows::report::{build_report, SortOrder};
use crate::flows::scheduler::count_sources;

/// How much goes to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Failures only
    Quiet,
    /// Failures and warnings
    #[default]
    Normal,
    /// Everything, including per-source timings
    Verbose,
}

/// Settings for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct CountConfig {
    pub ingest: IngestOptions,
    pub order: SortOrder,
    pub top: Option<usize>,
    pub render: RenderConfig,
    pub verbosity: Verbosity,
}

/// What a run did, per source and in total
#[derive(Debug, Clone)]
pub struct CountOutcome {
    pub reports: Vec<SourceReport>,
    pub summary: RunSummary,
}

/// Count `sources` (or `default` when there are none) and write the report to `out`.
pub fn count_words<S, W>(
    sources: &[S],
    default: &dyn InputSource,
    config: &CountConfig,
    mut out: W,
) -> Result<CountOutcome>
where
    S: InputSource,
    W: Write,
{
    let table = WordTable::new();
    let reports = count_sources(sources, default, &table, &config.ingest);

    // All workers have joined; the table is ours alone from here on.
    let words = table.total();
    let distinct = table.len();
    let entries = build_report(table, config.order, config.top);

    Renderer::with_config(config.render)
        .render_to(&entries, &mut out)
        .context("Failed to write report")?;

    let summary = RunSummary::from_reports(&reports, words, distinct);
    Ok(CountOutcome { reports, summary })
}

/// Print per-source diagnostics
pub fn write_diagnostics<W: Write>(
    outcome: &CountOutcome,
    verbosity: Verbosity,
    mut err: W,
) -> std::io::Result<()> {
    for report in &outcome.reports {
        match &report.error {
            Some(error) => {
                writeln!(
                    err,
                    "{} {} [{}]",
                    "error:".red().bold(),
                    error.message,
                    error.code.dimmed()
                )?;
                if report.words > 0 && verbosity != Verbosity::Quiet {
                    writeln!(
                        err,
                        "{} {} words from {} were kept",
                        "warning:".yellow().bold(),
                        report.words,
                        report.source
                    )?;
                }
            }
            None if verbosity == Verbosity::Verbose => {
                writeln!(
                    err,
                    "{} {}: {} words in {}ms",
                    "ok:".green(),
                    report.source,
                    report.words,
                    report.elapsed_ms
                )?;
            }
            None => {}
        }
    }

    if verbosity == Verbosity::Verbose {
        let summary = &outcome.summary;
        writeln!(
            err,
            "{} sources, {} failed, {} words, {} distinct",
            summary.sources, summary.failed, summary.words, summary.distinct
        )?;
    }
    Ok(())
}
