//! The [`AuditLog`] trait and its JSON-file implementation.
//!
//! The file holds a single JSON array of [`AuditEntry`] objects.  Every
//! append is a full read-modify-write of that array:
//!
//! 1. Read the current array.  A missing or empty file is an empty array; an
//!    unreadable or unparsable one is logged and **replaced by an empty
//!    array**, so history before the corruption is lost.
//! 2. Push the new entry.
//! 3. Write the array to a sibling `*.tmp` file and rename it over the
//!    original.
//!
//! Reads through [`AuditLog::entries`] are stricter about I/O: a file that
//! exists but cannot be read is reported as [`AuditError::Io`] instead of
//! showing up as an empty trail.  Unparsable content is still an empty list.
//!
//! Appends through one [`JsonFileAuditLog`] are serialised by an async mutex.
//! Separate processes writing the same file are not coordinated.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{AuditEntry, AuditError};

/// Append-only sink for audit entries.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Persist one entry after all previously appended ones.
    async fn append(&self, entry: AuditEntry) -> Result<(), AuditError>;

    /// Every stored entry, in append order.
    async fn entries(&self) -> Result<Vec<AuditEntry>, AuditError>;

    /// The trail of a single run.
    async fn entries_for(&self, workflow_id: &str) -> Result<Vec<AuditEntry>, AuditError> {
        let mut entries = self.entries().await?;
        entries.retain(|e| e.workflow_id == workflow_id);
        Ok(entries)
    }
}

/// Audit log persisted as a pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct JsonFileAuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored array for an append, falling back to an empty one on
    /// any problem.
    async fn load(&self) -> Vec<AuditEntry> {
        match self.read_raw().await {
            Ok(Some(bytes)) => self.parse(&bytes),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read audit log {}, starting fresh: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// File contents, or `None` when the file does not exist yet.
    async fn read_raw(&self) -> std::io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("audit log {} does not exist yet", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn parse(&self, bytes: &[u8]) -> Vec<AuditEntry> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice::<Vec<AuditEntry>>(bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "audit log {} is corrupted, discarding {} bytes of prior history: {}",
                    self.path.display(),
                    bytes.len(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn store(&self, entries: &[AuditEntry]) -> Result<(), AuditError> {
        let data = serde_json::to_vec_pretty(entries)?;
        let io_err = |source| AuditError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &data).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(io_err)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl AuditLog for JsonFileAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        entries.push(entry);
        self.store(&entries).await?;

        debug!("audit log {} now holds {} entries", self.path.display(), entries.len());
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        let _guard = self.write_lock.lock().await;
        match self.read_raw().await {
            Ok(Some(bytes)) => Ok(self.parse(&bytes)),
            Ok(None) => Ok(Vec::new()),
            Err(source) => Err(AuditError::Io { path: self.path.clone(), source }),
        }
    }
}
