use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::ApiError;
use audit::AuditEntry;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub workflow_id: Option<String>,
}

/// All stored entries, or one run's trail when `workflow_id` is given.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    let entries = match query.workflow_id {
        Some(id) => state.audit.entries_for(&id).await?,
        None => state.audit.entries().await?,
    };
    Ok(Json(entries))
}
