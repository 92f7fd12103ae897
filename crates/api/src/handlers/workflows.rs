use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{info, warn};

use super::AppState;
use crate::ApiError;
use audit::{summarize_runs, WorkflowSummary};
use engine::{TriggerEvent, WorkflowId, WorkflowResponse};

/// `POST /v1/execute-workflow` — run a workflow synchronously.
pub async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<TriggerEvent>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    let Json(trigger) = payload.map_err(|rejection| {
        warn!("failed to decode request: {}", rejection.body_text());
        ApiError::InvalidRequest(format!(
            "Failed to decode JSON request: {}",
            rejection.body_text()
        ))
    })?;

    let workflow_id = WorkflowId::generate();
    info!("executing workflow {} for event: {}", workflow_id, trigger.event);

    let response = state.executor.execute(&workflow_id, trigger).await?;
    Ok(Json(response))
}

/// `GET /v1/workflows` — run summaries rebuilt from the audit trail.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<WorkflowSummary>>, ApiError> {
    let entries = state.audit.entries().await?;
    Ok(Json(summarize_runs(&entries)))
}

/// `GET /v1/workflows/:id`
pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WorkflowSummary>, ApiError> {
    let entries = state.audit.entries_for(&id).await?;
    summarize_runs(&entries)
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("workflow {id} not found")))
}
