//! The sidebar tree node and the user-supplied fields of a new node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the sidebar tree.
///
/// Serializes with the same field names the seed data uses, so a forest can
/// be loaded from JSON and exported back without translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Identifier, unique across the whole forest
    pub id: String,
    /// Display label
    pub name: String,
    /// Symbolic icon reference (e.g. `bi-folder`)
    pub icon: String,
    /// Navigation target; `None` or empty means not navigable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether this node is expanded in the UI
    #[serde(default)]
    pub expanded: bool,
    /// Depth recorded with the node (0 = root). Informational only.
    #[serde(default)]
    pub level: usize,
    /// Child nodes, in display order
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new collapsed root-level leaf
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            url: None,
            expanded: false,
            level: 0,
            children: Vec::new(),
        }
    }

    /// Set the navigation target
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build a node from a draft, placed at `level`
    pub fn from_draft(id: String, draft: &NodeDraft, level: usize) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            icon: draft.icon.clone(),
            url: draft.url.clone(),
            expanded: false,
            level,
            children: Vec::new(),
        }
    }

    /// Add a child node, one level below this one
    pub fn add_child(&mut self, mut child: TreeNode) {
        child.level = self.level + 1;
        self.children.push(child);
    }

    /// Check if this node has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The url to hand to the router, if any
    pub fn navigation_target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The fields a user supplies for a new node. The id is generated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeDraft {
    pub name: String,
    pub icon: String,
    pub url: Option<String>,
}

impl NodeDraft {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_node_creation() {
        let node = TreeNode::new("1", "Dashboard", "bi-speedometer2");
        assert_eq!(node.id, "1");
        assert_eq!(node.name, "Dashboard");
        assert!(!node.expanded);
        assert_eq!(node.level, 0);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_add_child_sets_level() {
        let mut parent = TreeNode::new("2", "Category", "bi-folder");
        parent.add_child(TreeNode::new("2-1", "Subcategory 1", "bi-folder"));

        assert!(parent.has_children());
        assert_eq!(parent.children[0].level, 1);
        assert_eq!(parent.subtree_len(), 2);
    }

    #[test]
    fn test_navigation_target_ignores_empty_url() {
        let node = TreeNode::new("1", "Home", "bi-house");
        assert_eq!(node.navigation_target(), None);

        let node = node.with_url("");
        assert_eq!(node.navigation_target(), None);

        let node = node.with_url("/reports");
        assert_eq!(node.navigation_target(), Some("/reports"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id": "1", "name": "Dashboard", "icon": "bi-speedometer2"}"#;
        let node: TreeNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.url, None);
        assert!(!node.expanded);
        assert_eq!(node.level, 0);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_from_draft() {
        let draft = NodeDraft::new("X", "bi-file").with_url("/x");
        let node = TreeNode::from_draft("n1".to_string(), &draft, 2);

        assert_eq!(node.id, "n1");
        assert_eq!(node.name, "X");
        assert_eq!(node.url.as_deref(), Some("/x"));
        assert_eq!(node.level, 2);
        assert!(!node.expanded);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_display() {
        let node = TreeNode::new("2-2", "Subcategory 2", "bi-folder");
        assert_eq!(format!("{}", node), "Subcategory 2 (2-2)");
    }
}
