//! File-backed persistence: the graph document and the interaction log

pub mod document;
pub mod log;

pub use document::{load_document, save_document};
pub use log::InteractionLog;
