//! Student interaction records

use crate::graph::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student interaction event, append-only and immutable once written.
///
/// `node_id` is a weak reference into the graph; `node_label` is a
/// denormalized copy taken at record time and never re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub student_id: String,
    pub node_id: NodeId,
    pub node_label: String,
    pub action_type: String,
    /// Seconds spent, 0 when unknown
    #[serde(default)]
    pub duration: u64,
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(
        student_id: impl Into<String>,
        node_id: impl Into<NodeId>,
        node_label: impl Into<String>,
        action_type: impl Into<String>,
        duration: u64,
    ) -> Self {
        InteractionRecord {
            student_id: student_id.into(),
            node_id: node_id.into(),
            node_label: node_label.into(),
            action_type: action_type.into(),
            duration,
            timestamp: Utc::now(),
        }
    }

    /// Best-effort unique identity: student, node and a timestamp-derived
    /// token. Uniqueness is not enforced anywhere.
    pub fn token(&self) -> String {
        format!(
            "{}_{}_{}",
            self.student_id,
            self.node_id,
            self.timestamp.format("%Y%m%d%H%M%S%6f")
        )
    }

    #[cfg(test)]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
