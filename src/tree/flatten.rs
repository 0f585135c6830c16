//! Flattening the forest into visible rows.
//!
//! The sidebar renders a scrollable list, so the tree is walked depth-first
//! and only nodes whose ancestors are all expanded are emitted.

use super::node::TreeNode;

/// A flattened representation of a tree node for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedNode {
    /// Node id
    pub id: String,
    /// Display label
    pub name: String,
    /// Icon reference
    pub icon: String,
    /// Navigation target, if any
    pub url: Option<String>,
    /// Depth in the rendered tree (0 = root)
    pub depth: usize,
    /// Whether this node is currently expanded
    pub is_expanded: bool,
    /// Whether this node has children
    pub has_children: bool,
    /// Whether this is the last child of its parent
    pub is_last_child: bool,
    /// For each ancestor below the roots, whether it is a last child
    pub ancestors_last: Vec<bool>,
}

impl FlattenedNode {
    /// Get the expansion indicator
    pub fn expansion_indicator(&self) -> &'static str {
        if !self.has_children {
            "  "
        } else if self.is_expanded {
            "▼ "
        } else {
            "▶ "
        }
    }

    /// Leaves carry the action-menu affordance
    pub fn action_marker(&self) -> &'static str {
        if self.has_children {
            ""
        } else {
            " ⋯"
        }
    }

    /// Whether activating this row should navigate
    pub fn is_navigable(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Build the tree prefix (indentation and branch lines)
    pub fn tree_prefix(&self) -> String {
        let mut prefix = String::new();

        for &is_last in &self.ancestors_last {
            if is_last {
                prefix.push_str("    ");
            } else {
                prefix.push_str("│   ");
            }
        }

        if self.depth > 0 {
            if self.is_last_child {
                prefix.push_str("└── ");
            } else {
                prefix.push_str("├── ");
            }
        }

        prefix
    }
}

/// Flatten the forest into its visible rows
pub fn flatten(forest: &[TreeNode]) -> Vec<FlattenedNode> {
    let mut result = Vec::new();
    let mut ancestors_last = Vec::new();
    flatten_recursive(forest, 0, &mut ancestors_last, &mut result);
    result
}

fn flatten_recursive(
    nodes: &[TreeNode],
    depth: usize,
    ancestors_last: &mut Vec<bool>,
    result: &mut Vec<FlattenedNode>,
) {
    let count = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        let is_last_child = i + 1 == count;
        result.push(FlattenedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            icon: node.icon.clone(),
            url: node.url.clone(),
            depth,
            is_expanded: node.expanded,
            has_children: node.has_children(),
            is_last_child,
            ancestors_last: ancestors_last.clone(),
        });

        if node.expanded && node.has_children() {
            // Roots draw no connector, so they contribute no guide column.
            if depth > 0 {
                ancestors_last.push(is_last_child);
            }
            flatten_recursive(&node.children, depth + 1, ancestors_last, result);
            if depth > 0 {
                ancestors_last.pop();
            }
        }
    }
}
