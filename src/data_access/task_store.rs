//! Task collection ↔ JSON file persistence.
//!
//! The whole collection lives in one pretty-printed JSON array. Every
//! mutation is load → modify in memory → save. Saves go to a sibling
//! `.tmp` file first and are renamed over the backing file, so readers
//! only ever see a complete array.
//!
//! There is no lock between load and save: two overlapping
//! read-modify-write sequences can lose one of the updates.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};
#[cfg(feature = "profile")]
use std::time::Instant;

use thiserror::Error;

use crate::{data_access::task_id, task::Task};

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection. A missing or empty file is an empty
    /// collection, not an error.
    pub async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(StoreError::Parse)
    }

    /// Replace the full collection on disk.
    pub async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        #[cfg(feature = "profile")]
        let total_start = Instant::now();

        let json = serde_json::to_string_pretty(tasks).map_err(StoreError::Encode)?;
        let tmp = self.temp_path();

        #[cfg(feature = "profile")]
        let write_start = Instant::now();
        if let Err(e) = tokio::fs::write(&tmp, json).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e));
        }
        #[cfg(feature = "profile")]
        tracing::debug!(elapsed_us = write_start.elapsed().as_micros() as u64, "save wrote temp file");

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e));
        }
        #[cfg(feature = "profile")]
        tracing::debug!(total_us = total_start.elapsed().as_micros() as u64, "save renamed over backing file");

        tracing::debug!(count = tasks.len(), path = %self.path.display(), "saved tasks");
        Ok(())
    }

    pub fn generate_id(&self) -> String {
        task_id::generate_id()
    }

    // `tasks.json` → `tasks.json.tmp`, in the same directory so the rename
    // stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("tasks"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("parse: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("encode: {0}")]
    Encode(#[source] serde_json::Error),
}

// ── Tests ──────────────────────────────────────────────────────
