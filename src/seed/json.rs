//! Loader for JSON seed files.
//!
//! A seed file is a JSON array of nodes using the field names of
//! [`TreeNode`]. Only `id`, `name` and `icon` are required.

use std::fs;
use std::path::Path;

use crate::error::TreeResult;
use crate::tree::{ops, Forest, TreeNode};

const DEFAULT_SEED: &str = include_str!("default.json");

/// Parses a seed file into a raw node list, without validation.
pub fn parse_file(path: &Path) -> TreeResult<Vec<TreeNode>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses seed JSON from a string, without validation.
///
/// # Example
///
/// ```
/// use sidebar_tree::seed::parse_str;
///
/// let json = r#"[{"id": "1", "name": "Dashboard", "icon": "bi-speedometer2", "url": "/"}]"#;
/// let nodes = parse_str(json).unwrap();
/// assert_eq!(nodes[0].name, "Dashboard");
/// ```
pub fn parse_str(content: &str) -> TreeResult<Vec<TreeNode>> {
    let nodes: Vec<TreeNode> = serde_json::from_str(content)?;
    Ok(nodes)
}

/// Validates a parsed node list.
///
/// Rejects empty and duplicate ids. Cycles cannot be expressed by a nested
/// JSON document, so no separate check is needed for them.
pub fn validate(nodes: &[TreeNode]) -> TreeResult<()> {
    ops::validate(nodes)
}

/// Reads, parses and validates a seed file.
pub fn load_file(path: &Path) -> TreeResult<Forest> {
    let nodes = parse_file(path)?;
    let forest = Forest::new(nodes)?;
    tracing::info!(path = %path.display(), nodes = forest.len(), "loaded seed file");
    Ok(forest)
}

/// Parses and validates seed JSON from a string.
pub fn load_str(content: &str) -> TreeResult<Forest> {
    Forest::new(parse_str(content)?)
}

/// The built-in sidebar: Dashboard, Category and Region sections.
pub fn default_forest() -> TreeResult<Forest> {
    load_str(DEFAULT_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;

    const SAMPLE_SEED: &str = r#"[
        {
            "id": "1",
            "name": "Dashboard",
            "icon": "bi-speedometer2",
            "url": "/",
            "expanded": false,
            "level": 0,
            "children": []
        },
        {
            "id": "2",
            "name": "Category",
            "icon": "bi-folder",
            "expanded": true,
            "level": 0,
            "children": [
                {
                    "id": "2-1",
                    "name": "Subcategory 1",
                    "icon": "bi-folder",
                    "url": "/",
                    "level": 1
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_str_valid() {
        let nodes = parse_str(SAMPLE_SEED).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].url.as_deref(), Some("/"));
        assert_eq!(nodes[1].url, None);
        assert!(nodes[1].expanded);
        assert_eq!(nodes[1].children[0].id, "2-1");
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("[{ invalid json }]");
        assert!(matches!(result.unwrap_err(), TreeError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_missing_name() {
        let result = parse_str(r#"[{"id": "1", "icon": "bi-file"}]"#);
        assert!(matches!(result.unwrap_err(), TreeError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_rejects_object() {
        let result = parse_str(r#"{"id": "1", "name": "x", "icon": "bi-file"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_str_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "2", "name": "Category", "icon": "bi-folder", "children": [
                {"id": "2-1", "name": "Subcategory 1", "icon": "bi-folder", "level": 1}
            ]},
            {"id": "3", "name": "Region", "icon": "bi-folder", "children": [
                {"id": "2-1", "name": "Subcategory 1", "icon": "bi-folder", "level": 1}
            ]}
        ]"#;

        let err = load_str(json).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateId { ref id } if id == "2-1"));
    }

    #[test]
    fn test_validate_sample() {
        let nodes = parse_str(SAMPLE_SEED).unwrap();
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn test_default_forest_is_valid() {
        let forest = default_forest().unwrap();

        assert_eq!(forest.roots().len(), 3);
        assert_eq!(forest.len(), 11);
        assert!(forest.find("3-1").is_some());
        assert_eq!(forest.find("2-2-1-1").unwrap().level, 3);
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, TreeError::IoError(_)));
    }

    #[test]
    fn test_load_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("sidebar-seed-{}.json", std::process::id()));
        fs::write(&path, SAMPLE_SEED).unwrap();

        let forest = load_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.rows().len(), 3);
    }
}
