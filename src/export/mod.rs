//! Export functionality for sidebar forests.
//!
//! This module provides exporters for writing a forest out as JSON (in the
//! seed schema, so it can be loaded again) or as a Markdown outline.

pub mod json;
pub mod markdown;

use crate::tree::TreeNode;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - seed-compatible node array
    Json,
    /// Markdown format - nested bullet outline
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the forest to the given writer.
    fn export<W: Write>(&self, forest: &[TreeNode], writer: &mut W) -> io::Result<()>;
}

/// Export a forest in the specified format.
pub fn export<W: Write>(format: ExportFormat, forest: &[TreeNode], writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(forest, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(forest, writer),
    }
}

/// Export a forest to a string.
pub fn export_to_string(format: ExportFormat, forest: &[TreeNode]) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, forest, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
