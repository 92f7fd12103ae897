//! Audit record types.
//!
//! These map 1-to-1 onto the objects of the persisted JSON array, so the
//! field names are part of the on-disk format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// The step of a workflow run an entry records.
///
/// Names this build does not write are kept verbatim in `Other`, so a store
/// shared with other writers survives a read-modify-write unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    WorkflowStarted,
    TemplatePlanGenerated,
    PlmConsultation,
    DocgenCommand,
    WorkflowCompleted,
    Other(String),
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkflowStarted       => write!(f, "workflow_started"),
            Self::TemplatePlanGenerated => write!(f, "template_plan_generated"),
            Self::PlmConsultation       => write!(f, "plm_consultation"),
            Self::DocgenCommand         => write!(f, "docgen_command"),
            Self::WorkflowCompleted     => write!(f, "workflow_completed"),
            Self::Other(name)           => f.write_str(name),
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "workflow_started"        => Self::WorkflowStarted,
            "template_plan_generated" => Self::TemplatePlanGenerated,
            "plm_consultation"        => Self::PlmConsultation,
            "docgen_command"          => Self::DocgenCommand,
            "workflow_completed"      => Self::WorkflowCompleted,
            other                     => Self::Other(other.to_owned()),
        })
    }
}

impl From<String> for AuditAction {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(action) => action,
            Err(never) => match never {},
        }
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        action.to_string()
    }
}

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Outcome of the recorded step.  Unrecognised values are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditStatus {
    Success,
    Failed,
    Other(String),
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success      => write!(f, "success"),
            Self::Failed       => write!(f, "failed"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

impl From<String> for AuditStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Self::Success,
            "failed"  => Self::Failed,
            _         => Self::Other(s),
        }
    }
}

impl From<AuditStatus> for String {
    fn from(status: AuditStatus) -> Self {
        status.to_string()
    }
}

// ---------------------------------------------------------------------------
// AuditEntry
// ---------------------------------------------------------------------------

/// One immutable record of a workflow step's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub workflow_id: String,
    /// Name of the trigger event that started the run.
    #[serde(default)]
    pub event: String,
    pub action: AuditAction,
    pub status: AuditStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// A successful step, stamped with the current time.
    pub fn success(
        workflow_id: impl Into<String>,
        event: impl Into<String>,
        action: AuditAction,
    ) -> Self {
        Self::new(workflow_id.into(), event.into(), action, AuditStatus::Success)
    }

    /// A failed step, stamped with the current time.
    pub fn failed(
        workflow_id: impl Into<String>,
        event: impl Into<String>,
        action: AuditAction,
        error: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(workflow_id.into(), event.into(), action, AuditStatus::Failed);
        entry.error = Some(error.into());
        entry
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Look up a string field in `details`.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.as_ref()?.get(key)?.as_str()
    }

    fn new(workflow_id: String, event: String, action: AuditAction, status: AuditStatus) -> Self {
        Self {
            timestamp: Utc::now(),
            workflow_id,
            event,
            action,
            status,
            details: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted_when_empty() {
        let entry = AuditEntry::success("wf-1", "schematic.released", AuditAction::WorkflowStarted);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["action"], "workflow_started");
        assert_eq!(value["status"], "success");
        assert!(value.get("details").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failed_entry_carries_error_text() {
        let entry = AuditEntry::failed(
            "wf-1",
            "schematic.released",
            AuditAction::PlmConsultation,
            "PLM service returned 404",
        );
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "PLM service returned 404");
    }

    #[test]
    fn detail_str_reads_nested_string() {
        let entry = AuditEntry::success("wf-1", "e", AuditAction::WorkflowCompleted)
            .with_details(json!({ "final_document_url": "gcs://bucket/f.docx", "n": 3 }));

        assert_eq!(entry.detail_str("final_document_url"), Some("gcs://bucket/f.docx"));
        assert_eq!(entry.detail_str("n"), None);
        assert_eq!(entry.detail_str("missing"), None);
    }

    #[test]
    fn action_display_matches_wire_name() {
        for action in [
            AuditAction::WorkflowStarted,
            AuditAction::TemplatePlanGenerated,
            AuditAction::PlmConsultation,
            AuditAction::DocgenCommand,
            AuditAction::WorkflowCompleted,
        ] {
            let wire = serde_json::to_value(&action).unwrap();
            assert_eq!(wire, action.to_string());
            assert_eq!(action.to_string().parse::<AuditAction>(), Ok(action));
        }
    }

    #[test]
    fn unrecognised_action_and_status_round_trip_verbatim() {
        let raw = json!({
            "timestamp": "2024-05-01T10:00:00Z",
            "workflow_id": "wf-1",
            "event": "schematic.released",
            "action": "workflow_failed",
            "status": "skipped",
        });

        let entry: AuditEntry = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(entry.action, AuditAction::Other("workflow_failed".into()));
        assert_eq!(entry.status, AuditStatus::Other("skipped".into()));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn known_status_names_map_to_variants() {
        assert_eq!(AuditStatus::from("failed".to_owned()), AuditStatus::Failed);
        assert_eq!(AuditStatus::from("success".to_owned()), AuditStatus::Success);
    }
}
