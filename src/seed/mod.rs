//! Seed data for the sidebar.
//!
//! The forest is loaded once at startup, either from a JSON seed file or
//! from the built-in default, and validated before use.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sidebar_tree::seed;
//!
//! let forest = seed::load_file(Path::new("menu.json")).unwrap();
//! println!("Loaded {} nodes", forest.len());
//! ```

pub mod json;

pub use json::{default_forest, load_file, load_str, parse_file, parse_str, validate};
