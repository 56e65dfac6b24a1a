//! Jurisgraph
//!
//! A browsable knowledge-graph service for an International Law
//! curriculum: a JSON graph document rendered through an HTTP visualizer,
//! student interaction logging with admin analytics, and an optional
//! best-effort Neo4j mirror.
//!
//! # Architecture
//!
//! Data flows one direction. The graph store feeds the bounded traversals
//! (subgraph selection for the browse view, neighborhood highlighting for
//! clicks), the interaction log feeds the aggregations, and the HTTP layer
//! only presents. No component writes back into another's state; the only
//! mutations are whole-collection admin actions.
//!
//! ## Example
//!
//! ```rust
//! use jurisgraph::graph::{Category, GraphDocument, GraphStore, Node, Relationship};
//! use jurisgraph::algo;
//!
//! let store = GraphStore::from_document(GraphDocument {
//!     nodes: vec![
//!         Node::new("root", "国际法知识图谱", Category::CoreQuestion, 0),
//!         Node::new("q1", "国际法主体", Category::CoreQuestion, 1),
//!         Node::new("c1", "国家要素", Category::TheoryBasis, 2),
//!     ],
//!     relationships: vec![
//!         Relationship::new("root", "q1", "包含"),
//!         Relationship::new("q1", "c1", "包含"),
//!     ],
//! });
//!
//! // Everything within two hops of the picked topic.
//! let sub = algo::select(&store, Some(&"q1".into()), algo::DEFAULT_MAX_DEPTH);
//! assert_eq!(sub.nodes.len(), 3);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod analytics;
pub mod config;
pub mod error;
pub mod graph;
pub mod http;
pub mod mirror;
pub mod persistence;

// Re-export main types for convenience
pub use algo::{highlight, related_chain, select, HighlightSet, RelatedLink, DEFAULT_MAX_DEPTH};
pub use analytics::InteractionRecord;
pub use config::{AppConfig, MirrorConfig};
pub use error::{StoreError, StoreResult};
pub use graph::{Category, GraphDocument, GraphStore, Node, NodeId, RelKey, Relationship};
pub use http::{AppState, HttpServer};
pub use mirror::{InteractionSink, Neo4jMirror, WriteOutcome, WriteReport};
pub use persistence::InteractionLog;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
