//! Route handlers and the state they share.

use std::sync::Arc;

use audit::AuditLog;
use engine::WorkflowExecutor;

pub mod audit_trail;
pub mod health;
pub mod metrics;
pub mod workflows;

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<WorkflowExecutor>,
    pub audit: Arc<dyn AuditLog>,
}

impl AppState {
    pub fn new(executor: Arc<WorkflowExecutor>, audit: Arc<dyn AuditLog>) -> Self {
        Self { executor, audit }
    }
}
