//! Navigation collaborator.
//!
//! The sidebar never navigates on its own; it hands a node's url to a
//! [`Router`]. Nodes without a url (or with an empty one) are not navigable.

use crate::tree::TreeNode;

/// Performs client-side navigation to a target string
pub trait Router {
    fn push(&mut self, target: &str);
}

/// Navigate to `node`'s url, if it has one.
///
/// Returns true if the router was invoked.
pub fn navigate<R: Router + ?Sized>(router: &mut R, node: &TreeNode) -> bool {
    match node.navigation_target() {
        Some(target) => {
            tracing::info!(id = %node.id, target, "navigating");
            router.push(target);
            true
        }
        None => false,
    }
}

/// A router that records every navigation in memory
#[derive(Debug, Clone, Default)]
pub struct HistoryRouter {
    history: Vec<String>,
}

impl HistoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent target
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// All targets, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Router for HistoryRouter {
    fn push(&mut self, target: &str) {
        self.history.push(target.to_string());
    }
}
