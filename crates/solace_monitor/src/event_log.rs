//! Append-only, timestamped history of detector verdicts.
//!
//! Persisted as one JSON array, rewritten in full on every append via a
//! temp file renamed into place: a reader in this process never sees a
//! partial write. Records are never edited or deleted here — retention
//! is an external concern. The host serializes concurrent writers.

use solace_core::{SignalRecord, SignalReport, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed event log with a constructor-supplied location.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp the report with the current time and append it.
    ///
    /// A missing log file is initialized to an empty sequence; a
    /// malformed one is recovered by starting over (with a warning)
    /// rather than refusing to record a safety signal.
    pub fn record(&self, report: SignalReport) -> Result<SignalRecord, StoreError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("event log unreadable, starting a fresh sequence: {e}");
                Vec::new()
            }
        };

        let record = SignalRecord::now(report);
        if record.report.emergency {
            tracing::warn!(timestamp = %record.timestamp, "recording emergency signal");
        }
        entries.push(record.clone());
        self.save(&entries)?;
        Ok(record)
    }

    /// All entries in insertion order. Missing file means an empty log;
    /// a malformed document is an error.
    pub fn read_all(&self) -> Result<Vec<SignalRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))
    }

    fn save(&self, entries: &[SignalRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(&self.path, e))?;

        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::to_writer_pretty(tmp.as_file(), entries)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}
