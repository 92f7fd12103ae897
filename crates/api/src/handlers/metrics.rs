use axum::{extract::State, Json};

use super::AppState;
use crate::ApiError;
use audit::{summarize_runs, WorkflowMetrics};

/// `GET /v1/metrics` — run counts derived from the audit trail.
pub async fn metrics(State(state): State<AppState>) -> Result<Json<WorkflowMetrics>, ApiError> {
    let entries = state.audit.entries().await?;
    Ok(Json(WorkflowMetrics::from_runs(&summarize_runs(&entries))))
}
