//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::source::Source;
use crate::core::tokenizer::{TokenizerConfig, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::flows::count::{count_words, write_diagnostics, CountConfig, Verbosity};
use crate::flows::ingest::{IngestOptions, PartialPolicy};
use crate::flows::report::SortOrder;

/// pwords - count word frequencies across files, one thread per file.
#[derive(Parser, Debug)]
#[command(name = "pwords")]
#[command(
    author,
    version,
    about,
    long_about = r#"pwords reads every FILE on its own thread, counts the words of all of
them into one shared table, and prints one line per distinct word:

    <count>\t<word>

sorted by descending count (ties in ascending word order).

With no FILE, or when FILE is -, standard input is read.

A file that cannot be opened or read is reported on stderr; the others are
still counted and the report is still printed. The exit status is then 1.

Examples:
    pwords book.txt notes.txt
    cat book.txt | pwords --top 20
    pwords --format jsonl --min-len 1 *.txt
"#
)]
pub struct Cli {
    /// Input files (standard input when omitted).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        env = "PWORDS_FORMAT",
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the report format.\n\n\
Supported values:\n\
- text (default): <count>\\t<word> per line\n\
- jsonl: one {\"word\",\"count\"} object per line\n\
- json: a single JSON array\n\
- md: a Markdown table"
    )]
    pub format: String,

    /// Report order (count/count-asc/word).
    #[arg(long, env = "PWORDS_SORT", default_value = "count", value_name = "ORDER")]
    pub sort: String,

    /// Only print the first N entries of the report.
    #[arg(long, env = "PWORDS_TOP", value_name = "N")]
    pub top: Option<usize>,

    /// Shortest run of letters that counts as a word.
    #[arg(long, env = "PWORDS_MIN_LEN", default_value_t = DEFAULT_MIN_LEN, value_name = "N")]
    pub min_len: usize,

    /// Longest word; longer runs of letters are split.
    #[arg(long, env = "PWORDS_MAX_LEN", default_value_t = DEFAULT_MAX_LEN, value_name = "N")]
    pub max_len: usize,

    /// Count words with their original case instead of lowercasing them.
    #[arg(long)]
    pub keep_case: bool,

    /// Drop all counts of a file that fails part way through.
    #[arg(
        long,
        long_help = "By default, words read from a file before a read error stay counted.\n\
With this flag a file only contributes to the report if it was read to the end."
    )]
    pub discard_partial: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored diagnostics.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (only errors on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (per-file counts and timings on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve flags into a run configuration
    pub fn config(&self) -> Result<CountConfig> {
        let format: OutputFormat = self.format.parse().map_err(|e: String| anyhow!(e))?;
        let order: SortOrder = self.sort.parse().map_err(|e: String| anyhow!(e))?;
        if self.max_len == 0 {
            return Err(anyhow!("--max-len must be at least 1"));
        }

        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Ok(CountConfig {
            ingest: IngestOptions {
                tokenizer: TokenizerConfig {
                    min_len: self.min_len,
                    max_len: self.max_len,
                    lowercase: !self.keep_case,
                },
                partial: if self.discard_partial {
                    PartialPolicy::Discard
                } else {
                    PartialPolicy::Keep
                },
            },
            order,
            top: self.top,
            render: RenderConfig::with_pretty(format, self.pretty),
            verbosity,
        })
    }
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config()?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let sources: Vec<Source> = cli.files.iter().map(|f| Source::from_arg(f)).collect();

    let stdout = io::stdout();
    let outcome = count_words(&sources, &Source::Stdin, &config, stdout.lock())?;

    // Diagnostics are best effort; a closed stderr must not hide the exit status.
    let _ = write_diagnostics(&outcome, config.verbosity, io::stderr().lock());

    Ok(if outcome.summary.all_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
