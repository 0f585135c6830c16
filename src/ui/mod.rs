//! Terminal user interface for the sidebar
//!
//! Renders the forest as an indented menu and routes key presses to the
//! tree engine, the action menu and the add-node dialog.

mod app;

pub use app::{run_app, App, VirtualScrollState};
