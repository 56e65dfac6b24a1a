//! In-memory graph storage
//!
//! Read-mostly store over the document collections with hash indices for
//! O(1) lookup:
//! - `by_id`: NodeId -> position in `nodes`
//! - `outgoing` / `incoming`: NodeId -> positions in `relationships`
//!
//! The only mutations are whole-collection replace and clear; the browse
//! paths never edit nodes in place.

use super::document::GraphDocument;
use super::edge::Relationship;
use super::node::Node;
use super::types::NodeId;
use rustc_hash::FxHashMap;
use tracing::warn;

#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
    by_id: FxHashMap<NodeId, usize>,
    outgoing: FxHashMap<NodeId, Vec<usize>>,
    incoming: FxHashMap<NodeId, Vec<usize>>,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        GraphStore::default()
    }

    /// Build a store from a loaded document
    pub fn from_document(doc: GraphDocument) -> Self {
        let mut store = GraphStore::new();
        store.replace_all(doc);
        store
    }

    /// Replace the entire node/relationship collections.
    ///
    /// All-or-nothing from the caller's perspective; indices are rebuilt
    /// from scratch.
    pub fn replace_all(&mut self, doc: GraphDocument) {
        self.nodes = doc.nodes;
        self.relationships = doc.relationships;
        self.by_id = FxHashMap::default();
        self.outgoing = FxHashMap::default();
        self.incoming = FxHashMap::default();

        for (idx, node) in self.nodes.iter().enumerate() {
            if self.by_id.insert(node.id.clone(), idx).is_some() {
                // Ids are supposed to be globally unique; last entry wins,
                // matching a by-id map built over the raw collection.
                warn!(id = %node.id, "duplicate node id in graph document");
            }
        }
        for (idx, rel) in self.relationships.iter().enumerate() {
            self.outgoing.entry(rel.source.clone()).or_default().push(idx);
            self.incoming.entry(rel.target.clone()).or_default().push(idx);
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.replace_all(GraphDocument::empty());
    }

    /// Clone the collections back into document form
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            relationships: self.relationships.clone(),
        }
    }

    pub fn find_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Relationships leaving `id`, in document order
    pub fn outgoing(&self, id: &NodeId) -> Vec<&Relationship> {
        self.outgoing
            .get(id)
            .map(|idxs| idxs.iter().map(|&i| &self.relationships[i]).collect())
            .unwrap_or_default()
    }

    /// Relationships arriving at `id`, in document order
    pub fn incoming(&self, id: &NodeId) -> Vec<&Relationship> {
        self.incoming
            .get(id)
            .map(|idxs| idxs.iter().map(|&i| &self.relationships[i]).collect())
            .unwrap_or_default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The single level-0 root node, if the document has one
    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_root())
    }

    /// The level-1 core-question topic anchors, sorted by id for a stable
    /// menu order
    pub fn core_questions(&self) -> Vec<&Node> {
        let mut questions: Vec<&Node> =
            self.nodes.iter().filter(|n| n.is_core_question()).collect();
        questions.sort_by(|a, b| a.id.cmp(&b.id));
        questions
    }
}
