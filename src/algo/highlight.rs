//! Neighborhood highlighting and the related-links chain
//!
//! Clicking a node dims everything outside its bounded neighborhood. The
//! walk here is direction-aware for presentation and, unlike plain
//! subgraph selection, enforces topic isolation: highlighting one core
//! question must not bleed into a sibling core question through a direct
//! link. Crossing into a sibling is allowed only when the step is taken
//! from the curriculum root, at any hop.

use super::common::UndirectedView;
use crate::graph::{GraphStore, NodeId, RelKey};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::VecDeque;

/// Node and relationship identities to light up for a focus
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    pub nodes: FxHashSet<NodeId>,
    pub relationships: FxHashSet<RelKey>,
}

/// Which way a related link points, relative to the node it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// One entry of the human-readable "related links" list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedLink {
    /// 1-based hop at which the link was discovered
    pub level: usize,
    pub direction: Direction,
    /// Label of the node on the far side (its id when unknown)
    pub label: String,
    pub rel_type: String,
}

/// Compute the nodes and relationships to highlight around `focus`,
/// within `max_depth` undirected hops.
///
/// Relationships are collected from every expanded node, so a link between
/// two outermost-ring nodes stays dim. When the focus is a core question,
/// a step into another core question is suppressed unless taken from the
/// root node, and an edge joining two distinct core questions is never lit
/// from either end.
pub fn highlight(store: &GraphStore, focus: &NodeId, max_depth: usize) -> HighlightSet {
    let mut set = HighlightSet::default();
    set.nodes.insert(focus.clone());

    let isolate_topics = store
        .find_by_id(focus)
        .map(|n| n.is_core_question())
        .unwrap_or(false);

    let view = UndirectedView::new(store);
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut frontier: VecDeque<(NodeId, usize)> = VecDeque::new();
    frontier.push_back((focus.clone(), 0));

    while let Some((id, depth)) = frontier.pop_front() {
        if depth >= max_depth || !visited.insert(id.clone()) {
            continue;
        }
        let stepping_from_root = store
            .find_by_id(&id)
            .map(|n| n.is_root())
            .unwrap_or(false);
        let expanding_topic = store
            .find_by_id(&id)
            .map(|n| n.is_core_question())
            .unwrap_or(false);

        for &idx in view.incident(&id) {
            let rel = view.relationship(idx);
            let Some(other) = rel.other_end(&id) else {
                continue;
            };
            if isolate_topics && !stepping_from_root {
                let into_topic = store
                    .find_by_id(other)
                    .map(|n| n.is_core_question())
                    .unwrap_or(false);
                // An edge back onto the focus is fine from a child, but a
                // sibling topic stepping back onto the focus is still a
                // direct topic-to-topic link and stays dark.
                let back_to_focus = other == focus && !expanding_topic;
                if into_topic && other != &id && !back_to_focus {
                    continue;
                }
            }
            set.relationships.insert(rel.key());
            if set.nodes.insert(other.clone()) {
                frontier.push_back((other.clone(), depth + 1));
            }
        }
    }

    set
}

/// Enumerate every relationship the bounded walk around `focus` touches,
/// in discovery order, one entry per `(source, target, type)` identity.
///
/// Direction is relative to the node being expanded: `Out` when the
/// relationship leaves it, `In` when it arrives. Topic isolation does not
/// apply here; the list mirrors the plain neighborhood.
pub fn related_chain(store: &GraphStore, focus: &NodeId, max_depth: usize) -> Vec<RelatedLink> {
    let view = UndirectedView::new(store);

    let mut links = Vec::new();
    let mut seen: FxHashSet<RelKey> = FxHashSet::default();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut enqueued: FxHashSet<NodeId> = FxHashSet::default();
    enqueued.insert(focus.clone());
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
            if seen.insert(rel.key()) {
                let direction = if rel.source == id {
                    Direction::Out
                } else {
                    Direction::In
                };
                let label = store
                    .find_by_id(other)
                    .map(|n| n.label.clone())
                    .unwrap_or_else(|| other.to_string());
                links.push(RelatedLink {
                    level: depth + 1,
                    direction,
                    label,
                    rel_type: rel.rel_type.clone(),
                });
            }
            if enqueued.insert(other.clone()) {
                frontier.push_back((other.clone(), depth + 1));
            }
        }
    }

    links
}
