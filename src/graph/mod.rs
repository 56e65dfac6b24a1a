//! Knowledge-graph data model and in-memory storage
//!
//! One fixed dataset shape: nodes with id/label/category/type/level/
//! description/properties, directed relationships with source/target/type/
//! description, both carried whole in a single JSON document.

pub mod document;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use document::GraphDocument;
pub use edge::Relationship;
pub use node::Node;
pub use store::GraphStore;
pub use types::{Category, NodeId, RelKey};
