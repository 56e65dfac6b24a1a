//! Graph document file I/O
//!
//! The document is read whole at startup and only ever rewritten whole
//! (admin wipe). Writes go through a temp file in the same directory and
//! a rename, so readers observe either the old or the new document.

use crate::error::{StoreError, StoreResult};
use crate::graph::GraphDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load the graph document, failing with `DataUnavailable` when the file
/// is missing or malformed. Callers degrade to an empty graph.
pub fn load_document(path: impl AsRef<Path>) -> StoreResult<GraphDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StoreError::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let doc: GraphDocument =
        serde_json::from_str(&text).map_err(|e| StoreError::DataUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    info!(
        path = %path.display(),
        nodes = doc.nodes.len(),
        relationships = doc.relationships.len(),
        "graph document loaded"
    );
    Ok(doc)
}

/// Rewrite the whole document atomically.
pub fn save_document(path: impl AsRef<Path>, doc: &GraphDocument) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "graph document saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, Node, Relationship};
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let doc = GraphDocument {
            nodes: vec![
                Node::new("root", "root", Category::CoreQuestion, 0)
                    .with_property("z_last", "1")
                    .with_property("a_first", "2"),
                Node::new("q1", "q1", Category::CoreQuestion, 1),
            ],
            relationships: vec![Relationship::new("root", "q1", "包含")],
        };

        save_document(&path, &doc).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded, doc);
        // Property bag iteration order survives the trip.
        let keys: Vec<&str> = loaded.nodes[0].properties.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z_last", "a_first"]);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let err = load_document(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::DataUnavailable { .. }));
    }

    #[test]
    fn test_malformed_file_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, StoreError::DataUnavailable { .. }));
    }
}
