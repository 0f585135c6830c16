//! Runtime configuration for a sidebar instance.
//!
//! Values come from command-line flags, with environment fallbacks handled
//! by clap in `main.rs`.

use std::path::PathBuf;

use crate::error::TreeResult;
use crate::seed;
use crate::tree::{ids::DEFAULT_ID_PREFIX, Forest, IdGenerator};

/// Icon given to new nodes when the dialog leaves it blank
pub const DEFAULT_ICON: &str = "bi-file";

/// Log filter used when none is configured
pub const DEFAULT_LOG_FILTER: &str = "sidebar_tree=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarConfig {
    /// Seed file; the built-in forest is used when unset
    pub seed: Option<PathBuf>,
    pub default_icon: String,
    /// Prefix for generated node ids
    pub id_prefix: String,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_icon: DEFAULT_ICON.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SidebarConfig {
    pub fn with_seed(mut self, seed: Option<PathBuf>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_default_icon(mut self, icon: impl Into<String>) -> Self {
        self.default_icon = icon.into();
        self
    }

    /// Load the configured seed (or the built-in one) into a forest whose
    /// generated ids use the configured prefix.
    pub fn load_forest(&self) -> TreeResult<Forest> {
        let roots = match &self.seed {
            Some(path) => seed::parse_file(path)?,
            None => seed::default_forest()?.into_roots(),
        };
        let forest = Forest::with_ids(roots, IdGenerator::with_prefix(self.id_prefix.clone()))?;
        tracing::info!(seed = ?self.seed, nodes = forest.len(), "loaded forest");
        Ok(forest)
    }
}
