//! Monotonic id generation for new nodes.

use std::collections::HashSet;

use super::node::TreeNode;

/// Default prefix for generated ids
pub const DEFAULT_ID_PREFIX: &str = "n";

/// Issues ids of the form `<prefix><counter>` with a strictly increasing
/// counter, skipping any id already seen in a forest.
///
/// Ids are never reused, even after the node that carried them is removed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
    taken: HashSet<String>,
    last_issued: Option<String>,
}

impl IdGenerator {
    /// Create a generator with the default prefix
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    /// Create a generator with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            taken: HashSet::new(),
            last_issued: None,
        }
    }

    /// Record every id in `forest` as taken
    pub fn observe(&mut self, forest: &[TreeNode]) {
        for node in forest {
            self.taken.insert(node.id.clone());
            self.observe(&node.children);
        }
    }

    /// Issue the next free id
    pub fn next_id(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                self.last_issued = Some(candidate.clone());
                return candidate;
            }
        }
    }

    /// The most recently issued id
    pub fn last_issued(&self) -> Option<&str> {
        self.last_issued.as_deref()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
