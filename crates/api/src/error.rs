//! HTTP-facing error type.
//!
//! Every failure leaves the service as `{"error": <code>, "message": <text>}`
//! with a status matching the code.

use audit::AuditError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Undecodable body or a payload that fails validation.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    UnknownEvent(String),

    /// A collaborator step failed; the run was terminated.
    #[error("{0}")]
    WorkflowFailed(String),

    #[error("{0}")]
    NotFound(String),

    /// The audit store exists but could not be read.
    #[error("audit log unavailable: {0}")]
    Audit(#[from] AuditError),
}

/// Wire shape of an error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnknownEvent(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::WorkflowFailed(_) | Self::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::UnknownEvent(_) => "unknown_trigger_event",
            Self::WorkflowFailed(_) => "workflow_failed",
            Self::NotFound(_) => "not_found",
            Self::Audit(_) => "audit_unavailable",
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => Self::InvalidRequest(msg),
            e @ EngineError::UnknownEvent(_) => Self::UnknownEvent(e.to_string()),
            e => Self::WorkflowFailed(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }
        let body = ErrorBody {
            error: self.code().to_owned(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
