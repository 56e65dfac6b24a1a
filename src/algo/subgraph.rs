//! Bounded-depth subgraph selection for the browse view
//!
//! When a topic is picked in the sidebar, only the induced subgraph within
//! a fixed hop count of that topic is rendered. Reachability is undirected
//! and cycle-safe; the walk is an explicit worklist, not recursion.

use super::common::UndirectedView;
use crate::graph::{GraphDocument, GraphStore, NodeId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Compute the induced subgraph reachable within `max_depth` undirected
/// hops of `focus`.
///
/// Boundary-exact: `max_depth` 0 yields the focus alone, and no node at
/// hop distance greater than `max_depth` is ever included. Relationships
/// are kept only when both endpoints made it into the reached set.
/// Collection order follows the document, so identical inputs yield
/// identical outputs.
///
/// With no focus the full collections are returned unchanged. A focus id
/// absent from the node collection still seeds the walk (the result is
/// then empty apart from any relationships that mention it on both ends).
pub fn select(store: &GraphStore, focus: Option<&NodeId>, max_depth: usize) -> GraphDocument {
    let focus = match focus {
        Some(focus) => focus,
        None => return store.to_document(),
    };

    let reached = reachable(store, focus, max_depth);

    GraphDocument {
        nodes: store
            .nodes()
            .iter()
            .filter(|n| reached.contains(&n.id))
            .cloned()
            .collect(),
        relationships: store
            .relationships()
            .iter()
            .filter(|r| reached.contains(&r.source) && reached.contains(&r.target))
            .cloned()
            .collect(),
    }
}

/// The set of node ids within `max_depth` undirected hops of `focus`,
/// focus included.
pub fn reachable(store: &GraphStore, focus: &NodeId, max_depth: usize) -> FxHashSet<NodeId> {
    let view = UndirectedView::new(store);

    let mut reached: FxHashSet<NodeId> = FxHashSet::default();
    reached.insert(focus.clone());
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut frontier: VecDeque<(NodeId, usize)> = VecDeque::new();
    frontier.push_back((focus.clone(), 0));

    while let Some((id, depth)) = frontier.pop_front() {
        if depth >= max_depth || !visited.insert(id.clone()) {
            continue;
        }
        for &idx in view.incident(&id) {
            let rel = view.relationship(idx);
            let Some(other) = rel.other_end(&id) else {
                continue;
            };
            if reached.insert(other.clone()) {
                frontier.push_back((other.clone(), depth + 1));
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, Node, Relationship};

    // chain: a - b - c - d
    fn chain_store() -> GraphStore {
        GraphStore::from_document(GraphDocument {
            nodes: vec![
                Node::new("a", "a", Category::TheoryBasis, 1),
                Node::new("b", "b", Category::TheoryBasis, 2),
                Node::new("c", "c", Category::TheoryBasis, 3),
                Node::new("d", "d", Category::TheoryBasis, 4),
            ],
            relationships: vec![
                Relationship::new("a", "b", "contains"),
                Relationship::new("b", "c", "contains"),
                Relationship::new("c", "d", "contains"),
            ],
        })
    }

    fn node_ids(doc: &GraphDocument) -> Vec<&str> {
        doc.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_depth_zero_is_focus_alone() {
        let store = chain_store();
        let sub = select(&store, Some(&"b".into()), 0);
        assert_eq!(node_ids(&sub), vec!["b"]);
        assert!(sub.relationships.is_empty());
    }

    #[test]
    fn test_boundary_exact_at_two_hops() {
        let store = chain_store();
        let sub = select(&store, Some(&"a".into()), 2);
        assert_eq!(node_ids(&sub), vec!["a", "b", "c"]);
        assert_eq!(sub.relationships.len(), 2);
    }

    #[test]
    fn test_traversal_is_undirected() {
        let store = chain_store();
        let sub = select(&store, Some(&"d".into()), 2);
        assert_eq!(node_ids(&sub), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_no_focus_returns_everything() {
        let store = chain_store();
        let sub = select(&store, None, 2);
        assert_eq!(sub, store.to_document());
    }

    #[test]
    fn test_unknown_focus_yields_empty_result() {
        let store = chain_store();
        let sub = select(&store, Some(&"ghost".into()), 2);
        assert!(sub.nodes.is_empty());
        assert!(sub.relationships.is_empty());
        // The walk itself still seeds the unknown id.
        assert!(reachable(&store, &"ghost".into(), 2).contains(&"ghost".into()));
    }

    #[test]
    fn test_cycle_terminates() {
        let store = GraphStore::from_document(GraphDocument {
            nodes: vec![
                Node::new("x", "x", Category::CaseStudy, 1),
                Node::new("y", "y", Category::CaseStudy, 2),
            ],
            relationships: vec![
                Relationship::new("x", "y", "a"),
                Relationship::new("y", "x", "b"),
            ],
        });
        let sub = select(&store, Some(&"x".into()), 5);
        assert_eq!(node_ids(&sub), vec!["x", "y"]);
        assert_eq!(sub.relationships.len(), 2);
    }

    #[test]
    fn test_idempotent_result_set() {
        let store = chain_store();
        let first = select(&store, Some(&"b".into()), 2);
        let second = select(&store, Some(&"b".into()), 2);
        assert_eq!(first, second);
    }
}
