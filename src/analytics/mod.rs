//! Interaction records and the admin-dashboard aggregations

pub mod aggregate;
pub mod record;

pub use aggregate::{
    by_category, student_detail, students, summary, top_by_node, top_by_student, NodeVisits,
    StudentDetail, StudentVisits, Summary, UNKNOWN_CATEGORY,
};
pub use record::InteractionRecord;
