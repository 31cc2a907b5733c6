//! Core module - Contains the fundamental data structures
//!
//! This module provides:
//! - The shared word table
//! - The word tokenizer
//! - Input sources
//! - Error kinds and the run result model
//! - Rendering functions for different output formats

pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod table;
pub mod tokenizer;
