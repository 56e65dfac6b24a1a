//! Bounded-depth graph walks behind the browse view
//!
//! Two consumers share the same traversal shape: subgraph selection (what
//! to render when a topic is picked) and neighborhood highlighting (what
//! to light up when a node is clicked). Both are explicit-worklist walks
//! with a visited-set guard, bounded by a hop count.

pub mod common;
pub mod highlight;
pub mod subgraph;

pub use highlight::{highlight, related_chain, Direction, HighlightSet, RelatedLink};
pub use subgraph::{reachable, select};

/// Default hop bound for both walks, overridable per request
pub const DEFAULT_MAX_DEPTH: usize = 2;
