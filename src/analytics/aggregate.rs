//! Aggregation over the interaction log for the admin dashboard
//!
//! Pure functions over an immutable record slice; nothing here mutates its
//! input or touches storage. Grouping goes through `IndexMap` so ties are
//! broken by first-encountered order, deterministically.

use super::record::InteractionRecord;
use crate::graph::{Category, NodeId};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Bucket name for records whose node the graph no longer knows
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Headline counters for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub distinct_students: usize,
    pub distinct_nodes: usize,
    /// Mean over records with positive duration; `None` when there are
    /// none (rendered as N/A, never a division by zero)
    pub mean_duration: Option<f64>,
}

/// Visit count for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVisits {
    pub node_id: NodeId,
    pub node_label: String,
    pub count: u64,
}

/// Visit count for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentVisits {
    pub student_id: String,
    pub count: u64,
}

/// Per-student drill-down
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDetail {
    pub visited_node_count: usize,
    pub total_visits: usize,
    /// Sum of positive durations, seconds
    pub total_duration: u64,
    /// That student's records, timestamp ascending
    pub timeline: Vec<InteractionRecord>,
}

impl StudentDetail {
    /// Ordered node labels of the timeline, truncated for display
    pub fn learning_path(&self, limit: usize) -> Vec<String> {
        self.timeline
            .iter()
            .take(limit)
            .map(|r| r.node_label.clone())
            .collect()
    }
}

pub fn summary(records: &[InteractionRecord]) -> Summary {
    let mut students: FxHashSet<&str> = FxHashSet::default();
    let mut nodes: FxHashSet<&NodeId> = FxHashSet::default();
    let mut positive_total: u64 = 0;
    let mut positive_count: u64 = 0;

    for rec in records {
        students.insert(&rec.student_id);
        nodes.insert(&rec.node_id);
        if rec.duration > 0 {
            positive_total += rec.duration;
            positive_count += 1;
        }
    }

    Summary {
        total: records.len(),
        distinct_students: students.len(),
        distinct_nodes: nodes.len(),
        mean_duration: (positive_count > 0)
            .then(|| positive_total as f64 / positive_count as f64),
    }
}

/// Top `n` nodes by visit count, descending; ties keep first-encountered
/// node order. The label is the one first recorded for the node.
pub fn top_by_node(records: &[InteractionRecord], n: usize) -> Vec<NodeVisits> {
    let mut counts: IndexMap<&NodeId, (&str, u64)> = IndexMap::new();
    for rec in records {
        counts
            .entry(&rec.node_id)
            .or_insert((&rec.node_label, 0))
            .1 += 1;
    }

    let mut ranked: Vec<NodeVisits> = counts
        .into_iter()
        .map(|(node_id, (label, count))| NodeVisits {
            node_id: node_id.clone(),
            node_label: label.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Top `n` students by visit count, same ordering policy as `top_by_node`
pub fn top_by_student(records: &[InteractionRecord], n: usize) -> Vec<StudentVisits> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for rec in records {
        *counts.entry(&rec.student_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<StudentVisits> = counts
        .into_iter()
        .map(|(student_id, count)| StudentVisits {
            student_id: student_id.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Visit counts per knowledge category.
///
/// `category_of` resolves a node id against the current graph; records
/// whose node is unknown land in the [`UNKNOWN_CATEGORY`] bucket rather
/// than being dropped.
pub fn by_category<F>(records: &[InteractionRecord], category_of: F) -> IndexMap<String, u64>
where
    F: Fn(&NodeId) -> Option<Category>,
{
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for rec in records {
        let bucket = match category_of(&rec.node_id) {
            Some(cat) => cat.to_string(),
            None => UNKNOWN_CATEGORY.to_string(),
        };
        *counts.entry(bucket).or_insert(0) += 1;
    }
    counts
}

/// Everything the admin page shows for one student
pub fn student_detail(records: &[InteractionRecord], student_id: &str) -> StudentDetail {
    let mut timeline: Vec<InteractionRecord> = records
        .iter()
        .filter(|r| r.student_id == student_id)
        .cloned()
        .collect();
    timeline.sort_by_key(|r| r.timestamp);

    let visited: FxHashSet<&NodeId> = timeline.iter().map(|r| &r.node_id).collect();
    let total_duration = timeline
        .iter()
        .filter(|r| r.duration > 0)
        .map(|r| r.duration)
        .sum();

    StudentDetail {
        visited_node_count: visited.len(),
        total_visits: timeline.len(),
        total_duration,
        timeline,
    }
}

/// Sorted distinct student ids, for the admin picker
pub fn students(records: &[InteractionRecord]) -> Vec<String> {
    let mut ids: Vec<String> = records
        .iter()
        .map(|r| r.student_id.clone())
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();
    ids.sort();
    ids
}
