//! Relationship implementation for the knowledge graph

use super::types::{NodeId, RelKey};
use serde::{Deserialize, Serialize};

/// A directed relationship between two nodes
///
/// Storage-wise relationships are directed, but the browse-view traversals
/// treat them as undirected for reachability. There is no acyclicity
/// invariant; traversal code must be cycle-safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Node this relationship goes FROM
    pub source: NodeId,

    /// Node this relationship goes TO
    pub target: NodeId,

    /// Relation label (e.g. "包含")
    #[serde(rename = "type", default = "default_rel_type")]
    pub rel_type: String,

    #[serde(default)]
    pub description: String,
}

fn default_rel_type() -> String {
    "关联".to_string()
}

impl Relationship {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        rel_type: impl Into<String>,
    ) -> Self {
        Relationship {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
            description: String::new(),
        }
    }

    /// Presentation identity of this relationship
    pub fn key(&self) -> RelKey {
        RelKey::of(self)
    }

    /// Whether the given node is either endpoint
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint at all.
    /// A self-loop yields `id` itself.
    pub fn other_end<'a>(&'a self, id: &NodeId) -> Option<&'a NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_end_is_undirected() {
        let rel = Relationship::new("a", "b", "contains");
        assert_eq!(rel.other_end(&"a".into()), Some(&"b".into()));
        assert_eq!(rel.other_end(&"b".into()), Some(&"a".into()));
        assert_eq!(rel.other_end(&"c".into()), None);
    }

    #[test]
    fn test_missing_type_defaults() {
        let rel: Relationship =
            serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();
        assert_eq!(rel.rel_type, "关联");
        assert_eq!(rel.description, "");
    }
}
