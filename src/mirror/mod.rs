//! Best-effort mirroring and the dual-write interaction sink
//!
//! The mirror is never load-bearing: every read has a file fallback and
//! every write captures both outcomes instead of swallowing either.

pub mod client;

pub use client::Neo4jMirror;

use crate::analytics::InteractionRecord;
use crate::config::MirrorConfig;
use crate::error::StoreResult;
use crate::persistence::InteractionLog;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one side of a dual write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum WriteOutcome {
    Ok,
    /// That side is not configured (no mirror connected)
    Skipped,
    Failed(String),
}

impl WriteOutcome {
    fn from_result(result: StoreResult<()>) -> Self {
        match result {
            Ok(()) => WriteOutcome::Ok,
            Err(e) => WriteOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, WriteOutcome::Ok)
    }
}

/// Composite status of a write-through: mirror first, file always
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteReport {
    pub mirror: WriteOutcome,
    pub file: WriteOutcome,
}

impl WriteReport {
    /// The event survived somewhere
    pub fn recorded(&self) -> bool {
        self.mirror.is_ok() || self.file.is_ok()
    }
}

/// Try to bring up the mirror; `None` silently degrades everything to the
/// file-backed path. No retry loop.
pub async fn connect(config: &MirrorConfig) -> Option<Arc<Neo4jMirror>> {
    if !config.enabled {
        info!("mirror disabled by configuration");
        return None;
    }
    let mirror = match Neo4jMirror::new(config) {
        Ok(mirror) => mirror,
        Err(e) => {
            warn!(error = %e, "mirror client setup failed, continuing file-backed");
            return None;
        }
    };
    match mirror.probe().await {
        Ok(()) => {
            info!(uri = %config.uri, "mirror store connected");
            Some(Arc::new(mirror))
        }
        Err(e) => {
            warn!(error = %e, "mirror store unreachable, continuing file-backed");
            None
        }
    }
}

/// Write-through recorder for interaction events.
///
/// Appends are serialized through a mutex so each whole-file rewrite is
/// atomic with respect to other writers in this process.
pub struct InteractionSink {
    mirror: Option<Arc<Neo4jMirror>>,
    log: InteractionLog,
    append_lock: tokio::sync::Mutex<()>,
}

impl InteractionSink {
    pub fn new(mirror: Option<Arc<Neo4jMirror>>, log: InteractionLog) -> Self {
        InteractionSink {
            mirror,
            log,
            append_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    /// Record one event: attempt the mirror, capture its outcome, then
    /// always attempt the file log. Both outcomes are reported and logged;
    /// neither failure hides the other.
    pub async fn record(&self, record: &InteractionRecord) -> WriteReport {
        let mirror = match &self.mirror {
            Some(mirror) => {
                let outcome = WriteOutcome::from_result(mirror.insert_interaction(record).await);
                if let WriteOutcome::Failed(reason) = &outcome {
                    warn!(%reason, "mirror interaction write failed");
                }
                outcome
            }
            None => WriteOutcome::Skipped,
        };

        let _guard = self.append_lock.lock().await;
        let file = WriteOutcome::from_result(self.log.append(record));
        if let WriteOutcome::Failed(reason) = &file {
            warn!(%reason, "file interaction write failed");
        }

        WriteReport { mirror, file }
    }

    /// All records, mirror-first with file fallback. Returns the records,
    /// which source served them, and a diagnostic when the preferred
    /// source degraded.
    pub async fn fetch(&self) -> (Vec<InteractionRecord>, &'static str, Option<String>) {
        let mut diagnostic = None;
        if let Some(mirror) = &self.mirror {
            match mirror.fetch_interactions().await {
                Ok(records) => return (records, "mirror", None),
                Err(e) => {
                    warn!(error = %e, "mirror read failed, falling back to file");
                    diagnostic = Some(e.to_string());
                }
            }
        }
        match self.log.read_all() {
            Ok(records) => (records, "file", diagnostic),
            Err(e) => {
                warn!(error = %e, "interaction log unreadable");
                (Vec::new(), "file", Some(e.to_string()))
            }
        }
    }

    /// Clear interactions in both stores. Idempotent against empty state.
    pub async fn clear(&self) -> WriteReport {
        let mirror = match &self.mirror {
            Some(mirror) => WriteOutcome::from_result(mirror.clear_interactions().await),
            None => WriteOutcome::Skipped,
        };
        let _guard = self.append_lock.lock().await;
        let file = WriteOutcome::from_result(self.log.clear());
        WriteReport { mirror, file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rec(student: &str) -> InteractionRecord {
        InteractionRecord::new(student, "n1", "n1", "view", 0)
    }

    #[tokio::test]
    async fn test_record_without_mirror_skips_and_appends() {
        let dir = tempdir().unwrap();
        let sink = InteractionSink::new(None, InteractionLog::new(dir.path().join("log.json")));

        let report = sink.record(&rec("s1")).await;
        assert_eq!(report.mirror, WriteOutcome::Skipped);
        assert_eq!(report.file, WriteOutcome::Ok);
        assert!(report.recorded());

        let (records, source, diagnostic) = sink.fetch().await;
        assert_eq!(records.len(), 1);
        assert_eq!(source, "file");
        assert!(diagnostic.is_none());
    }

    #[tokio::test]
    async fn test_clear_without_mirror() {
        let dir = tempdir().unwrap();
        let sink = InteractionSink::new(None, InteractionLog::new(dir.path().join("log.json")));
        sink.record(&rec("s1")).await;

        let report = sink.clear().await;
        assert_eq!(report.file, WriteOutcome::Ok);
        let (records, _, _) = sink.fetch().await;
        assert!(records.is_empty());
    }
}
