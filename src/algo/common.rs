//! Shared utilities for the bounded traversals
//!
//! Provides a read-only incidence view of the graph so the walks can treat
//! directed relationships as undirected adjacency without rescanning the
//! whole relationship list per node.

use crate::graph::{GraphStore, NodeId, Relationship};
use rustc_hash::FxHashMap;

/// Undirected incidence view over a store's relationships.
///
/// Maps every node id that appears as an endpoint to the positions of its
/// incident relationships, in document order. Nodes without relationships
/// simply have no entry.
pub struct UndirectedView<'a> {
    store: &'a GraphStore,
    incident: FxHashMap<&'a NodeId, Vec<usize>>,
}

impl<'a> UndirectedView<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        let mut incident: FxHashMap<&'a NodeId, Vec<usize>> = FxHashMap::default();
        for (idx, rel) in store.relationships().iter().enumerate() {
            incident.entry(&rel.source).or_default().push(idx);
            if rel.target != rel.source {
                incident.entry(&rel.target).or_default().push(idx);
            }
        }
        Self { store, incident }
    }

    /// Positions of the relationships touching `id`, in document order
    pub fn incident(&self, id: &NodeId) -> &[usize] {
        self.incident.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn relationship(&self, idx: usize) -> &'a Relationship {
        &self.store.relationships()[idx]
    }
}
