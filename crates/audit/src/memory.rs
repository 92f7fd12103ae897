//! `MemoryAuditLog` — an in-process [`AuditLog`] for tests.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{AuditEntry, AuditError, AuditLog};

/// Keeps entries in a `Vec`.  Can be told to reject every append, to
/// exercise callers that must survive audit failures.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
    reject_writes: bool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose appends always fail with an I/O error.
    pub fn rejecting() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            reject_writes: true,
        }
    }

    /// Snapshot of the stored entries.
    pub fn snapshot(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        if self.reject_writes {
            return Err(AuditError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "writes rejected"),
            });
        }
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self.snapshot())
    }
}
