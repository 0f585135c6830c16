//! The forest owned by a sidebar instance.
//!
//! [`Forest`] wraps the pure rewrites in [`super::ops`] with id uniqueness:
//! it can only be built from a validated forest and it issues ids that never
//! collide, so every lookup resolves to at most one node.

use super::flatten::{flatten, FlattenedNode};
use super::ids::IdGenerator;
use super::node::{NodeDraft, TreeNode};
use super::ops;
use crate::error::TreeResult;

/// A validated forest plus the id generator for new nodes
#[derive(Debug, Clone)]
pub struct Forest {
    roots: Vec<TreeNode>,
    ids: IdGenerator,
}

impl Forest {
    /// Validate `roots` and take ownership of them
    pub fn new(roots: Vec<TreeNode>) -> TreeResult<Self> {
        Self::with_ids(roots, IdGenerator::new())
    }

    /// Like [`Forest::new`], with a caller-supplied id generator
    pub fn with_ids(roots: Vec<TreeNode>, mut ids: IdGenerator) -> TreeResult<Self> {
        ops::validate(&roots)?;
        ids.observe(&roots);
        Ok(Self { roots, ids })
    }

    /// An empty forest
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// The root sequence
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Consume the forest, returning the root sequence
    pub fn into_roots(self) -> Vec<TreeNode> {
        self.roots
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        ops::node_count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Look up a node by id
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        ops::find_node(id, &self.roots)
    }

    /// Flip the expansion of `id`. Returns false if the id is unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            tracing::debug!(id, "toggle ignored: no such node");
            return false;
        }
        self.roots = ops::toggle_expansion(id, &self.roots);
        true
    }

    /// Bring `id` to the requested expansion state.
    ///
    /// Returns true if the node exists and its state changed.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        match self.find(id).map(|node| node.expanded) {
            Some(current) if current != expanded => self.toggle(id),
            _ => false,
        }
    }

    /// Expand or collapse every interior node
    pub fn set_all_expanded(&mut self, expanded: bool) {
        self.roots = ops::set_all_expanded(&self.roots, expanded);
    }

    /// Append a child to `parent_id`, returning the new id.
    ///
    /// An unknown parent is a silent no-op and returns `None`.
    pub fn add_child(&mut self, parent_id: &str, draft: &NodeDraft) -> Option<String> {
        if self.find(parent_id).is_none() {
            tracing::debug!(parent_id, "insert ignored: no such parent");
            return None;
        }
        self.roots = ops::insert_node(Some(parent_id), draft, &mut self.ids, &self.roots);
        let id = self.ids.last_issued().map(str::to_string);
        tracing::info!(parent_id, id = ?id, name = %draft.name, "added child node");
        id
    }

    /// Append a new root, returning its id
    pub fn add_root(&mut self, draft: &NodeDraft) -> String {
        self.roots = ops::insert_node(None, draft, &mut self.ids, &self.roots);
        let id = self.ids.last_issued().unwrap_or_default().to_string();
        tracing::info!(id = %id, name = %draft.name, "added root node");
        id
    }

    /// Append a sibling after the last node of `anchor_id`'s sequence,
    /// returning the new id. An unknown anchor returns `None`.
    pub fn add_sibling(&mut self, anchor_id: &str, draft: &NodeDraft) -> Option<String> {
        if self.find(anchor_id).is_none() {
            tracing::debug!(anchor_id, "insert ignored: no such sibling anchor");
            return None;
        }
        self.roots = ops::insert_sibling(anchor_id, draft, &mut self.ids, &self.roots);
        let id = self.ids.last_issued().map(str::to_string);
        tracing::info!(anchor_id, id = ?id, name = %draft.name, "added sibling node");
        id
    }

    /// Remove `id` and its subtree. Returns false if the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(node) = self.find(id) else {
            tracing::debug!(id, "remove ignored: no such node");
            return false;
        };
        let removed = node.subtree_len();
        self.roots = ops::remove_node(id, &self.roots);
        tracing::info!(id, removed, "removed node");
        true
    }

    /// The visible rows, in display order
    pub fn rows(&self) -> Vec<FlattenedNode> {
        flatten(&self.roots)
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::empty()
    }
}
