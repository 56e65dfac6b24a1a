//! File-backed interaction log
//!
//! A JSON array of records, appended by read-modify-rewrite of the whole
//! file. Not a streaming append: the dataset is one class's worth of
//! events. The rewrite lands via temp file + rename so an append either
//! fully records the event or loses it; partial records never appear.

use crate::analytics::InteractionRecord;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

impl InteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        InteractionLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every parseable record.
    ///
    /// A missing file is an empty log. A record that fails to deserialize
    /// is skipped with a warning; only a file that is not a JSON array at
    /// all fails, as `MalformedRecord`.
    pub fn read_all(&self) -> StoreResult<Vec<InteractionRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let raw: Vec<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| StoreError::MalformedRecord(format!("{}: {e}", self.path.display())))?;

        let mut records = Vec::with_capacity(raw.len());
        let mut skipped = 0usize;
        for value in raw {
            match serde_json::from_value::<InteractionRecord>(value) {
                Ok(rec) => records.push(rec),
                Err(e) => {
                    skipped += 1;
                    warn!(error = %e, "skipping malformed interaction record");
                }
            }
        }
        if skipped > 0 {
            warn!(skipped, path = %self.path.display(), "interaction log had unreadable records");
        }
        Ok(records)
    }

    /// Append one record: load all, push, rewrite the whole file.
    pub fn append(&self, record: &InteractionRecord) -> StoreResult<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());
        self.rewrite(&records)
    }

    /// Delete the log. Idempotent: a missing file is already clear.
    pub fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "interaction log cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn rewrite(&self, records: &[InteractionRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
