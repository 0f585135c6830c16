//! JSON export implementation.
//!
//! Writes the forest as a pretty-printed node array in the seed schema.

use super::Exporter;
use crate::tree::TreeNode;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, forest: &[TreeNode], writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(forest)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
