//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;

use super::edge::Relationship;

/// Unique identifier for a node
///
/// Ids come straight from the graph document and are immutable after
/// creation. Interaction records reference them weakly: a record may
/// dangle if the node is later removed from the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// The five knowledge categories of the curriculum
///
/// `CoreQuestion` at level 1 marks one of the eight topic anchors the
/// browse view is organized around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    CoreQuestion,
    TheoryBasis,
    ChinesePractice,
    CaseStudy,
    LegalText,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CoreQuestion,
        Category::TheoryBasis,
        Category::ChinesePractice,
        Category::CaseStudy,
        Category::LegalText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CoreQuestion => "CoreQuestion",
            Category::TheoryBasis => "TheoryBasis",
            Category::ChinesePractice => "ChinesePractice",
            Category::CaseStudy => "CaseStudy",
            Category::LegalText => "LegalText",
        }
    }

    /// Legend color used by the browse view
    pub fn color(&self) -> &'static str {
        match self {
            Category::CoreQuestion => "#FF6B6B",
            Category::TheoryBasis => "#4ECDC4",
            Category::ChinesePractice => "#FFD93D",
            Category::CaseStudy => "#95E1D3",
            Category::LegalText => "#A8DADC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation identity of a relationship
///
/// Relationships carry no id of their own; the `(source, target, type)`
/// triple identifies one for highlighting and deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct RelKey {
    pub source: NodeId,
    pub target: NodeId,
    pub rel_type: String,
}

impl RelKey {
    pub fn of(rel: &Relationship) -> Self {
        RelKey {
            source: rel.source.clone(),
            target: rel.target.clone(),
            rel_type: rel.rel_type.clone(),
        }
    }
}
