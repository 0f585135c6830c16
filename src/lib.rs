//! Sidebar Tree - collapsible, navigable sidebar menu
//!
//! This crate provides an immutable-style tree engine for hierarchical
//! sidebar menus (toggle, insert, find), an action menu and dialog state
//! machine for editing the menu, and a terminal UI for browsing it.

pub mod config;
pub mod error;
pub mod export;
pub mod overlay;
pub mod router;
pub mod seed;
pub mod tree;
pub mod ui;
