//! Markdown export implementation.
//!
//! Writes the forest as a nested bullet outline. Navigable nodes become links.

use super::Exporter;
use crate::tree::{node_count, TreeNode};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, forest: &[TreeNode], writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Sidebar Menu")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "**Sections:** {} | **Entries:** {}",
            forest.len(),
            node_count(forest)
        )?;
        writeln!(writer)?;

        if forest.is_empty() {
            writeln!(writer, "_No entries_")?;
        } else {
            write_outline(forest, 0, writer)?;
        }

        // Footer
        writeln!(writer)?;
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by sidebar-tree*")?;

        Ok(())
    }
}

fn write_outline<W: Write>(nodes: &[TreeNode], depth: usize, writer: &mut W) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node.navigation_target() {
            Some(url) => writeln!(writer, "{}- [{}]({}) `{}`", indent, node.name, url, node.icon)?,
            None => writeln!(writer, "{}- {} `{}`", indent, node.name, node.icon)?,
        }
        write_outline(&node.children, depth + 1, writer)?;
    }
    Ok(())
}
