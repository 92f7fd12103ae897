//! `audit` crate — the append-only audit trail of workflow runs.
//!
//! Provides the [`AuditEntry`] record, the [`AuditLog`] trait the engine
//! writes through, a JSON-file backed implementation and an in-memory one
//! for tests.  No workflow logic lives here.

pub mod error;
pub mod models;
pub mod log;
pub mod memory;
pub mod summary;

pub use error::AuditError;
pub use log::{AuditLog, JsonFileAuditLog};
pub use memory::MemoryAuditLog;
pub use models::{AuditAction, AuditEntry, AuditStatus};
pub use summary::{summarize_runs, RunStatus, WorkflowMetrics, WorkflowSummary};
