//! Node implementation for the knowledge graph

use super::types::{Category, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the knowledge graph
///
/// Exactly one node sits at `level` 0 (the root of the whole curriculum);
/// the level-1 `CoreQuestion` nodes are the topic anchors; everything else
/// hangs off some ancestor chain at level >= 1.
///
/// `properties` is an insertion-ordered string map so a document survives
/// a load/save round-trip with its hand-edited key order intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, immutable identifier
    pub id: NodeId,

    /// Display label
    pub label: String,

    /// One of the five knowledge categories
    pub category: Category,

    /// Free-form subtype (e.g. "条约程序")
    #[serde(rename = "type")]
    pub node_type: String,

    /// Depth in the curriculum hierarchy; 0 marks the single root
    #[serde(default = "default_level")]
    pub level: u32,

    #[serde(default)]
    pub description: String,

    /// Free-form metadata shown on the detail card, insertion-ordered
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

fn default_level() -> u32 {
    1
}

impl Node {
    /// Create a new node with an empty property bag
    pub fn new(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        category: Category,
        level: u32,
    ) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            category,
            node_type: String::new(),
            level,
            description: String::new(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The single level-0 curriculum root
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// A level-1 core-question topic anchor
    pub fn is_core_question(&self) -> bool {
        self.level == 1 && self.category == Category::CoreQuestion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_serde_rename() {
        let json = r#"{
            "id": "q1",
            "label": "Subjects of International Law",
            "category": "CoreQuestion",
            "type": "问题导向",
            "level": 1,
            "description": ""
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, "问题导向");
        assert!(node.is_core_question());
        assert!(!node.is_root());

        let out = serde_json::to_value(&node).unwrap();
        assert_eq!(out["type"], "问题导向");
        assert!(out.get("node_type").is_none());
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let node = Node::new("root", "国际法知识图谱", Category::CoreQuestion, 0)
            .with_property("课程", "国际法")
            .with_property("学时", "54学时")
            .with_property("结构", "1个中心+8大核心问题");
        let keys: Vec<&str> = node.properties.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["课程", "学时", "结构"]);
    }
}
