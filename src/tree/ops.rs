//! Pure forest rewrites.
//!
//! Every mutating operation takes the current forest by reference and returns
//! a fresh one; the input is never modified. Lookups are by id and apply to
//! every matching node, so callers that need single-node semantics must keep
//! ids unique (see [`validate`]).

use std::collections::HashSet;

use super::ids::IdGenerator;
use super::node::{NodeDraft, TreeNode};
use crate::error::{TreeError, TreeResult};

/// Flip `expanded` on every node whose id is `id`.
///
/// Leaves are toggled too. An absent id yields an equal forest.
///
/// # Example
///
/// ```
/// use sidebar_tree::tree::{toggle_expansion, TreeNode};
///
/// let forest = vec![TreeNode::new("1", "Dashboard", "bi-speedometer2")];
/// let toggled = toggle_expansion("1", &forest);
/// assert!(toggled[0].expanded);
/// assert_eq!(toggle_expansion("1", &toggled), forest);
/// ```
pub fn toggle_expansion(id: &str, forest: &[TreeNode]) -> Vec<TreeNode> {
    forest
        .iter()
        .map(|node| {
            if node.id == id {
                TreeNode {
                    expanded: !node.expanded,
                    ..node.clone()
                }
            } else if node.has_children() {
                TreeNode {
                    children: toggle_expansion(id, &node.children),
                    ..node.clone()
                }
            } else {
                node.clone()
            }
        })
        .collect()
}

/// Append a new node built from `draft`.
///
/// With `parent_id = None` the node becomes the last root at level 0;
/// otherwise it becomes the last child of every node with that id, at
/// `parent.level + 1`. Each inserted node gets a fresh id from `ids`.
/// An unknown parent leaves the forest unchanged.
pub fn insert_node(
    parent_id: Option<&str>,
    draft: &NodeDraft,
    ids: &mut IdGenerator,
    forest: &[TreeNode],
) -> Vec<TreeNode> {
    ids.observe(forest);
    match parent_id {
        None => {
            let mut roots = forest.to_vec();
            roots.push(TreeNode::from_draft(ids.next_id(), draft, 0));
            roots
        }
        Some(parent_id) => insert_child(parent_id, draft, ids, forest),
    }
}

fn insert_child(
    parent_id: &str,
    draft: &NodeDraft,
    ids: &mut IdGenerator,
    nodes: &[TreeNode],
) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|node| {
            let mut children = insert_child(parent_id, draft, ids, &node.children);
            if node.id == parent_id {
                children.push(TreeNode::from_draft(ids.next_id(), draft, node.level + 1));
            }
            TreeNode {
                children,
                ..node.clone()
            }
        })
        .collect()
}

/// Append a new node at the end of the sequence that contains `anchor_id`,
/// at the anchor's level.
///
/// A root anchor appends a new root. An unknown anchor leaves the forest
/// unchanged.
pub fn insert_sibling(
    anchor_id: &str,
    draft: &NodeDraft,
    ids: &mut IdGenerator,
    forest: &[TreeNode],
) -> Vec<TreeNode> {
    ids.observe(forest);
    insert_sibling_into(anchor_id, draft, ids, forest)
}

fn insert_sibling_into(
    anchor_id: &str,
    draft: &NodeDraft,
    ids: &mut IdGenerator,
    nodes: &[TreeNode],
) -> Vec<TreeNode> {
    let mut result: Vec<TreeNode> = nodes
        .iter()
        .map(|node| TreeNode {
            children: insert_sibling_into(anchor_id, draft, ids, &node.children),
            ..node.clone()
        })
        .collect();

    if let Some(anchor) = nodes.iter().find(|node| node.id == anchor_id) {
        result.push(TreeNode::from_draft(ids.next_id(), draft, anchor.level));
    }
    result
}

/// Remove every node whose id is `id`, together with its subtree.
pub fn remove_node(id: &str, forest: &[TreeNode]) -> Vec<TreeNode> {
    forest
        .iter()
        .filter(|node| node.id != id)
        .map(|node| TreeNode {
            children: remove_node(id, &node.children),
            ..node.clone()
        })
        .collect()
}

/// Find the first node with `id`, depth-first in display order.
pub fn find_node<'a>(id: &str, forest: &'a [TreeNode]) -> Option<&'a TreeNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(id, &node.children) {
            return Some(found);
        }
    }
    None
}

/// Set `expanded` on every interior node. Leaves are left as they are.
pub fn set_all_expanded(forest: &[TreeNode], expanded: bool) -> Vec<TreeNode> {
    forest
        .iter()
        .map(|node| {
            if node.has_children() {
                TreeNode {
                    expanded,
                    children: set_all_expanded(&node.children, expanded),
                    ..node.clone()
                }
            } else {
                node.clone()
            }
        })
        .collect()
}

/// Total number of nodes in the forest
pub fn node_count(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::subtree_len).sum()
}

/// Check that every id is non-empty and unique.
///
/// A `level` that disagrees with the node's actual depth is logged and
/// tolerated, since nothing depends on it.
pub fn validate(forest: &[TreeNode]) -> TreeResult<()> {
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    validate_nodes(forest, 0, &mut seen, &mut path)
}

fn validate_nodes<'a>(
    nodes: &'a [TreeNode],
    depth: usize,
    seen: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> TreeResult<()> {
    for node in nodes {
        path.push(&node.name);
        if node.id.is_empty() {
            return Err(TreeError::EmptyId {
                path: path.join(" / "),
            });
        }
        if !seen.insert(&node.id) {
            return Err(TreeError::DuplicateId {
                id: node.id.clone(),
            });
        }
        if node.level != depth {
            tracing::warn!(
                id = %node.id,
                level = node.level,
                depth,
                "node level does not match its depth"
            );
        }
        validate_nodes(&node.children, depth + 1, seen, path)?;
        path.pop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_forest() -> Vec<TreeNode> {
        let dashboard = TreeNode::new("1", "Dashboard", "bi-speedometer2").with_url("/");

        let mut category = TreeNode::new("2", "Category", "bi-folder");
        category.add_child(TreeNode::new("2-1", "Subcategory 1", "bi-folder").with_url("/"));
        let mut sub2 = TreeNode::new("2-2", "Subcategory 2", "bi-folder");
        sub2.level = 1;
        sub2.add_child(TreeNode::new("2-2-1", "Sub-subcategory", "bi-file"));
        category.children.push(sub2);

        vec![dashboard, category]
    }

    #[test]
    fn test_toggle_leaf_root() {
        let forest = vec![TreeNode::new("1", "Dashboard", "bi-speedometer2")];
        let toggled = toggle_expansion("1", &forest);

        assert_eq!(toggled.len(), 1);
        assert!(toggled[0].expanded);
        assert!(toggled[0].children.is_empty());
    }

    #[test]
    fn test_toggle_nested_only_flips_target() {
        let forest = create_test_forest();
        let toggled = toggle_expansion("2-2", &forest);

        assert!(toggled[1].children[1].expanded);
        assert!(!toggled[1].expanded);
        assert!(!toggled[1].children[0].expanded);
        assert!(!toggled[1].children[1].children[0].expanded);
    }

    #[test]
    fn test_toggle_twice_restores_forest() {
        let forest = create_test_forest();
        let twice = toggle_expansion("2-2-1", &toggle_expansion("2-2-1", &forest));
        assert_eq!(twice, forest);
    }

    #[test]
    fn test_toggle_missing_id_is_noop() {
        let forest = create_test_forest();
        assert_eq!(toggle_expansion("missing", &forest), forest);
    }

    #[test]
    fn test_toggle_duplicate_ids_flips_all_matches() {
        let mut category = TreeNode::new("2", "Category", "bi-folder");
        category.add_child(TreeNode::new("2-1", "Subcategory 1", "bi-folder"));
        let mut region = TreeNode::new("3", "Region", "bi-folder");
        region.add_child(TreeNode::new("2-1", "Subcategory 1", "bi-folder"));
        let forest = vec![category, region];

        let toggled = toggle_expansion("2-1", &forest);

        assert!(toggled[0].children[0].expanded);
        assert!(toggled[1].children[0].expanded);
    }

    #[test]
    fn test_collapse_keeps_descendant_flags() {
        let forest = create_test_forest();
        let forest = toggle_expansion("2", &forest);
        let forest = toggle_expansion("2-2", &forest);
        let forest = toggle_expansion("2", &forest);

        assert!(!forest[1].expanded);
        assert!(forest[1].children[1].expanded);
    }

    #[test]
    fn test_insert_child_appends_last() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();
        let draft = NodeDraft::new("X", "bi-file").with_url("");

        let result = insert_node(Some("2"), &draft, &mut ids, &forest);
        let parent = find_node("2", &result).unwrap();

        assert_eq!(parent.children.len(), 3);
        let added = parent.children.last().unwrap();
        assert_eq!(added.name, "X");
        assert_eq!(added.icon, "bi-file");
        assert_eq!(added.level, 1);
        assert!(!added.expanded);
        assert!(added.children.is_empty());
        assert_ne!(added.id, "2");
        assert!(find_node(&added.id, &forest).is_none());
    }

    #[test]
    fn test_insert_child_into_leaf() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_node(Some("2-2-1"), &NodeDraft::new("Deep", "bi-file"), &mut ids, &forest);
        let parent = find_node("2-2-1", &result).unwrap();

        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].level, parent.level + 1);
    }

    #[test]
    fn test_insert_root() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_node(None, &NodeDraft::new("Settings", "bi-gear"), &mut ids, &forest);

        assert_eq!(result.len(), 3);
        assert_eq!(result[2].name, "Settings");
        assert_eq!(result[2].level, 0);
        assert_eq!(&result[..2], &forest[..]);
    }

    #[test]
    fn test_insert_missing_parent_is_noop() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_node(Some("missing"), &NodeDraft::new("X", "bi-file"), &mut ids, &forest);
        assert_eq!(result, forest);
    }

    #[test]
    fn test_insert_sibling_of_nested_node() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_sibling("2-1", &NodeDraft::new("Sibling", "bi-file"), &mut ids, &forest);
        let parent = find_node("2", &result).unwrap();

        assert_eq!(parent.children.len(), 3);
        assert_eq!(parent.children[2].name, "Sibling");
        assert_eq!(parent.children[2].level, 1);
        assert_eq!(parent.children[0].children.len(), 0);
    }

    #[test]
    fn test_insert_sibling_of_root() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_sibling("1", &NodeDraft::new("Reports", "bi-file"), &mut ids, &forest);

        assert_eq!(result.len(), 3);
        assert_eq!(result[2].name, "Reports");
        assert_eq!(result[2].level, 0);
    }

    #[test]
    fn test_insert_sibling_missing_anchor_is_noop() {
        let forest = create_test_forest();
        let mut ids = IdGenerator::new();

        let result = insert_sibling("missing", &NodeDraft::new("X", "bi-file"), &mut ids, &forest);
        assert_eq!(result, forest);
    }

    #[test]
    fn test_generated_id_avoids_seed_ids() {
        let forest = vec![TreeNode::new("n1", "Looks generated", "bi-file")];
        let mut ids = IdGenerator::new();

        let result = insert_node(None, &NodeDraft::new("New", "bi-file"), &mut ids, &forest);
        assert_eq!(result[1].id, "n2");
    }

    #[test]
    fn test_remove_subtree() {
        let forest = create_test_forest();
        let result = remove_node("2-2", &forest);

        assert_eq!(node_count(&result), 3);
        assert!(find_node("2-2", &result).is_none());
        assert!(find_node("2-2-1", &result).is_none());
        assert!(find_node("2-1", &result).is_some());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let forest = create_test_forest();
        assert_eq!(remove_node("missing", &forest), forest);
    }

    #[test]
    fn test_find_node_first_match_wins() {
        let first = TreeNode::new("dup", "First", "bi-file");
        let mut parent = TreeNode::new("p", "Parent", "bi-folder");
        parent.add_child(TreeNode::new("dup", "Second", "bi-file"));
        let forest = vec![parent, first];

        assert_eq!(find_node("dup", &forest).unwrap().name, "Second");
        assert!(find_node("nope", &forest).is_none());
    }

    #[test]
    fn test_set_all_expanded_skips_leaves() {
        let forest = create_test_forest();
        let expanded = set_all_expanded(&forest, true);

        assert!(!expanded[0].expanded);
        assert!(expanded[1].expanded);
        assert!(expanded[1].children[1].expanded);
        assert!(!expanded[1].children[1].children[0].expanded);

        let collapsed = set_all_expanded(&expanded, false);
        assert_eq!(collapsed, forest);
    }

    #[test]
    fn test_node_count() {
        assert_eq!(node_count(&create_test_forest()), 5);
        assert_eq!(node_count(&[]), 0);
    }

    #[test]
    fn test_validate_accepts_unique_ids() {
        assert!(validate(&create_test_forest()).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut forest = create_test_forest();
        forest.push(TreeNode::new("2-1", "Again", "bi-file"));

        let err = validate(&forest).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateId { ref id } if id == "2-1"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut parent = TreeNode::new("p", "Parent", "bi-folder");
        parent.add_child(TreeNode::new("", "Nameless", "bi-file"));

        let err = validate(&[parent]).unwrap_err();
        assert!(matches!(err, TreeError::EmptyId { ref path } if path == "Parent / Nameless"));
    }
}
