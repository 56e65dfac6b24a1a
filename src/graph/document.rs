//! The graph document: the on-disk and wire shape of the whole graph
//!
//! A document is a plain `{nodes, relationships}` pair, UTF-8,
//! human-editable, no schema version field. Collection order is
//! significant and preserved end to end.

use super::edge::Relationship;
use super::node::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl GraphDocument {
    /// A blank data warehouse, as written by the admin wipe action
    pub fn empty() -> Self {
        GraphDocument::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let doc: GraphDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }
}
