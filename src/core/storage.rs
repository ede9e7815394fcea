//! Analysis history storage
//!
//! Records are append-only. The engine never touches storage; callers pass
//! a store handle to whatever needs it.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::types::AnalysisRecord;

/// Time-series sink for analysis records
pub trait AnalysisStore: Send + Sync {
    fn append(&self, record: AnalysisRecord) -> Result<()>;

    /// All records of one user, oldest first
    fn history(&self, user_id: &str) -> Result<Vec<AnalysisRecord>>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalysisStore for MemoryStore {
    fn append(&self, record: AnalysisRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| EngineError::Storage("memory store lock poisoned".to_string()))?;
        records.push(record);
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<AnalysisRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| EngineError::Storage("memory store lock poisoned".to_string()))?;
        Ok(records
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }
}

/// One JSON record per line in a single append-only file
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Parent directories are created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalysisStore for JsonlStore {
    fn append(&self, record: AnalysisRecord) -> Result<()> {
        let line = serde_json::to_string(&record)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| EngineError::Storage("jsonl store lock poisoned".to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        debug!(path = %self.path.display(), "analysis record appended");
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<AnalysisRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AnalysisRecord>(&line) {
                Ok(record) if record.user_id.as_deref() == Some(user_id) => records.push(record),
                Ok(_) => {}
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable record"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::RpsEngine;
    use chrono::Utc;

    fn record(user: Option<&str>, text: &str) -> AnalysisRecord {
        let report = RpsEngine::new().analyze_text(text);
        AnalysisRecord {
            user_id: user.map(str::to_string),
            session_id: None,
            recorded_at: Utc::now(),
            self_report: None,
            analysis: report.analysis,
            protocol: report.protocol.map(|p| p.name),
        }
    }

    #[test]
    fn test_memory_store_filters_by_user() {
        let store = MemoryStore::new();
        store.append(record(Some("u1"), "surcharge")).unwrap();
        store.append(record(Some("u2"), "débordé")).unwrap();
        store.append(record(None, "urgence")).unwrap();
        store.append(record(Some("u1"), "deadline")).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.history("u1").unwrap().len(), 2);
        assert!(store.history("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("none.jsonl"));
        assert!(store.history("u1").unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_store_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let store = JsonlStore::new(&path);
        store.append(record(Some("u1"), "surcharge")).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{truncated").unwrap();
        }
        store.append(record(Some("u1"), "débordé")).unwrap();
        assert_eq!(store.history("u1").unwrap().len(), 2);
    }
}
