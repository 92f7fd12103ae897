//! Per-run summaries reconstructed from the audit trail.
//!
//! A run appears once its `workflow_started` entry is seen.  Any failed
//! entry marks it failed; a successful `workflow_completed` marks it
//! completed; otherwise it is still running.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AuditAction, AuditEntry, AuditStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

/// What the audit trail says about one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub workflow_id: String,
    pub event: String,
    pub status: RunStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

/// Fold audit entries into run summaries, ordered by first appearance.
pub fn summarize_runs(entries: &[AuditEntry]) -> Vec<WorkflowSummary> {
    let mut runs: Vec<WorkflowSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if entry.action == AuditAction::WorkflowStarted {
            if index.contains_key(entry.workflow_id.as_str()) {
                continue;
            }
            index.insert(entry.workflow_id.as_str(), runs.len());
            runs.push(WorkflowSummary {
                workflow_id: entry.workflow_id.clone(),
                event: entry.event.clone(),
                status: RunStatus::Running,
                message: "Workflow in progress".into(),
                created_at: entry.timestamp,
                product_name: entry.detail_str("product_name").map(str::to_owned),
                revision: entry.detail_str("revision").map(str::to_owned),
                document_url: None,
            });
            continue;
        }

        let Some(&i) = index.get(entry.workflow_id.as_str()) else {
            continue;
        };
        let run = &mut runs[i];

        match (&entry.status, &entry.action) {
            (AuditStatus::Failed, action) => {
                run.status = RunStatus::Failed;
                run.message = match &entry.error {
                    Some(err) => format!("Workflow failed at {action}: {err}"),
                    None => format!("Workflow failed at {action}"),
                };
            }
            (AuditStatus::Success, AuditAction::WorkflowCompleted) => {
                run.status = RunStatus::Completed;
                run.message = "Workflow completed successfully".into();
                run.document_url = entry.detail_str("final_document_url").map(str::to_owned);
            }
            _ => {}
        }
    }

    runs
}

/// Run counts for the dashboard.  Runs still in progress count towards the
/// total only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowMetrics {
    pub total_workflows: usize,
    pub successful_workflows: usize,
    pub failed_workflows: usize,
}

impl WorkflowMetrics {
    pub fn from_runs(runs: &[WorkflowSummary]) -> Self {
        runs.iter().fold(Self::default(), |mut m, run| {
            m.total_workflows += 1;
            match run.status {
                RunStatus::Completed => m.successful_workflows += 1,
                RunStatus::Failed => m.failed_workflows += 1,
                RunStatus::Running => {}
            }
            m
        })
    }
}
