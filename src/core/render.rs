//! Renderer module
//!
//! Renders sorted entries to different output formats: text, jsonl, json, md

use std::io::{self, Write};

use crate::core::table::Entry;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<count>\t<word>` per line
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "tsv" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for report entries
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render entries, in the given order, to a writer
    pub fn render_to<W: Write>(&self, entries: &[Entry], mut writer: W) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => self.render_text(entries, &mut writer)?,
            OutputFormat::Jsonl => self.render_jsonl(entries, &mut writer)?,
            OutputFormat::Json => self.render_json(entries, &mut writer)?,
            OutputFormat::Markdown => self.render_markdown(entries, &mut writer)?,
        }
        writer.flush()
    }

    /// Render entries to a string
    #[allow(dead_code)]
    pub fn render(&self, entries: &[Entry]) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render_to(entries, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn render_text<W: Write>(&self, entries: &[Entry], writer: &mut W) -> io::Result<()> {
        for entry in entries {
            writeln!(writer, "{}\t{}", entry.count, entry.word)?;
        }
        Ok(())
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl<W: Write>(&self, entries: &[Entry], writer: &mut W) -> io::Result<()> {
        for entry in entries {
            if self.config.pretty {
                serde_json::to_writer_pretty(&mut *writer, entry)?;
            } else {
                serde_json::to_writer(&mut *writer, entry)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Render as a single JSON array
    fn render_json<W: Write>(&self, entries: &[Entry], writer: &mut W) -> io::Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut *writer, entries)?;
        } else {
            serde_json::to_writer(&mut *writer, entries)?;
        }
        writeln!(writer)
    }

    fn render_markdown<W: Write>(&self, entries: &[Entry], writer: &mut W) -> io::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        writeln!(writer, "| count | word |")?;
        writeln!(writer, "|------:|------|")?;
        for entry in entries {
            writeln!(writer, "| {} | `{}` |", entry.count, entry.word)?;
        }
        Ok(())
    }
}
