//! Core domain models for the workflow engine.
//!
//! A run starts from a [`TriggerEvent`], is identified by a [`WorkflowId`]
//! and ends with a [`WorkflowResponse`] (or an `EngineError`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::EngineError;

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The external occurrence that starts a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "trigger_event")]
    pub event: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl TriggerEvent {
    pub fn new(event: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

/// The workflow variants the engine knows how to run, keyed by event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    SchematicReleased,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchematicReleased => "schematic.released",
        }
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowKind {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schematic.released" => Ok(Self::SchematicReleased),
            other                => Err(EngineError::UnknownEvent(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowId
// ---------------------------------------------------------------------------

/// Identifier of one workflow run, `wf-<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("wf-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkflowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Schematic release input
// ---------------------------------------------------------------------------

/// Validated input of a `schematic.released` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicRelease {
    pub product_name: String,
    pub revision: String,
}

impl SchematicRelease {
    pub const DEFAULT_REVISION: &'static str = "A";

    /// Extract `product_name` (required, non-empty string) and `revision`
    /// (any non-string or missing value falls back to `"A"`).
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, EngineError> {
        let product_name = match payload.get("product_name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(Value::String(_)) => {
                return Err(EngineError::Validation("product_name must not be empty".into()))
            }
            _ => {
                return Err(EngineError::Validation(
                    "product_name is required in payload".into(),
                ))
            }
        };

        let revision = payload
            .get("revision")
            .and_then(Value::as_str)
            .unwrap_or(Self::DEFAULT_REVISION)
            .to_owned();

        Ok(Self { product_name, revision })
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Returned to the caller when a run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub status: String,
    pub workflow_id: WorkflowId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

impl WorkflowResponse {
    pub fn completed(workflow_id: WorkflowId, document_url: String) -> Self {
        Self {
            status: "success".into(),
            workflow_id,
            message: "Workflow completed successfully".into(),
            document_url: Some(document_url),
        }
    }
}
