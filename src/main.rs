//! pwords - Concurrent word frequency counter
//!
//! pwords provides:
//! - One ingest thread per input file, all counting into one shared table
//! - A configurable tokenizer (ASCII letters, lowercased by default)
//! - Deterministic reports sorted by descending count
//! - Text, jsonl, json and Markdown output

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod flows;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
