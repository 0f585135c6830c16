//! Tree state engine for the sidebar.
//!
//! The forest is a plain `Vec<TreeNode>`; every change is expressed as a pure
//! rewrite that returns a new forest (see [`ops`]). [`Forest`] owns one such
//! value for a sidebar instance and keeps its ids unique.
//!
//! # Example
//!
//! ```rust
//! use sidebar_tree::tree::{Forest, NodeDraft, TreeNode};
//!
//! let mut forest = Forest::new(vec![TreeNode::new("2", "Category", "bi-folder")]).unwrap();
//! let id = forest.add_child("2", &NodeDraft::new("Reports", "bi-file")).unwrap();
//!
//! assert!(forest.toggle("2"));
//! assert_eq!(forest.rows().len(), 2);
//! assert_eq!(forest.find(&id).unwrap().level, 1);
//! ```

mod flatten;
mod forest;
pub mod ids;
mod node;
pub mod ops;

pub use flatten::{flatten, FlattenedNode};
pub use forest::Forest;
pub use ids::IdGenerator;
pub use node::{NodeDraft, TreeNode};
pub use ops::{
    find_node, insert_node, insert_sibling, node_count, remove_node, set_all_expanded,
    toggle_expansion, validate,
};
