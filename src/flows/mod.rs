//! Flows module - The counting pipeline
//!
//! Provides:
//! - ingest: one worker folding a source's words into the shared table
//! - scheduler: fan-out of workers over all sources, and the join barrier
//! - report: ordering of the final entries
//! - count: a complete run, from sources to rendered report

pub mod count;
pub mod ingest;
pub mod report;
pub mod scheduler;
