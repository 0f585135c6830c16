//! Error types shared by the tree engine, seed loader and overlay.

/// Errors that can occur while loading or mutating the sidebar tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Failed to read a seed file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse seed JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Two nodes in the forest carry the same id.
    #[error("Duplicate node id: '{id}'")]
    DuplicateId { id: String },

    /// A node has an empty id. `path` is the chain of ancestor names.
    #[error("Node at '{path}' has an empty id")]
    EmptyId { path: String },

    /// A dialog was submitted without a required field.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// An overlay event arrived in a state that cannot handle it.
    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

/// Result type alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
