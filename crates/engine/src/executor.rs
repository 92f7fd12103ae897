//! Workflow execution engine.
//!
//! `WorkflowExecutor` is the central orchestrator of a `schematic.released`
//! run:
//! 1. Validates the trigger payload (no audit entry on failure).
//! 2. Records `workflow_started`.
//! 3. Builds the template plan from the catalog, records it.
//! 4. Asks the product data service to enrich it.
//! 5. Builds the document plan from the enriched components.
//! 6. Asks the document generator to render it, records completion.
//!
//! A collaborator failure is recorded against its step and ends the run.
//! Audit write failures are only logged.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use collaborators::{EnrichmentService, RenderService};
use serde_json::{json, Map, Value};
use tracing::{error, info, instrument, warn};

use crate::plan::{build_document_plan, unresolved_components};
use crate::{
    EngineError, SchematicRelease, TemplateCatalog, TriggerEvent, WorkflowId, WorkflowKind,
    WorkflowResponse,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// Which components each product line's template asks for.
    pub catalog: TemplateCatalog,
}

// ---------------------------------------------------------------------------
// WorkflowExecutor
// ---------------------------------------------------------------------------

/// Runs one workflow per call.  Holds no per-run state, so one executor is
/// shared by every request.
pub struct WorkflowExecutor {
    enrichment: Arc<dyn EnrichmentService>,
    render: Arc<dyn RenderService>,
    audit: Arc<dyn AuditLog>,
    config: ExecutorConfig,
}

impl WorkflowExecutor {
    pub fn new(
        enrichment: Arc<dyn EnrichmentService>,
        render: Arc<dyn RenderService>,
        audit: Arc<dyn AuditLog>,
        config: ExecutorConfig,
    ) -> Self {
        Self { enrichment, render, audit, config }
    }

    /// Run the workflow selected by the trigger's event name.
    ///
    /// # Errors
    /// `EngineError::UnknownEvent` before anything runs, otherwise whatever
    /// the selected workflow returns.
    #[instrument(skip_all, fields(workflow_id = %workflow_id, event = %trigger.event))]
    pub async fn execute(
        &self,
        workflow_id: &WorkflowId,
        trigger: TriggerEvent,
    ) -> Result<WorkflowResponse, EngineError> {
        let kind: WorkflowKind = trigger.event.parse()?;

        let result = match kind {
            WorkflowKind::SchematicReleased => {
                self.run_schematic_released(workflow_id, &trigger.payload).await
            }
        };

        match &result {
            Ok(_) => info!("workflow {} completed", workflow_id),
            Err(e) => error!("workflow {} failed: {}", workflow_id, e),
        }
        result
    }

    async fn run_schematic_released(
        &self,
        workflow_id: &WorkflowId,
        payload: &Map<String, Value>,
    ) -> Result<WorkflowResponse, EngineError> {
        let event = WorkflowKind::SchematicReleased.as_str();
        let release = SchematicRelease::from_payload(payload)?;

        self.record(
            AuditEntry::success(workflow_id.as_str(), event, AuditAction::WorkflowStarted)
                .with_details(json!({
                    "product_name": release.product_name,
                    "revision": release.revision,
                })),
        )
        .await;

        // ------------------------------------------------------------------
        // Template plan
        // ------------------------------------------------------------------
        let template = self.config.catalog.template_for(&release.product_name);
        self.record(
            AuditEntry::success(workflow_id.as_str(), event, AuditAction::TemplatePlanGenerated)
                .with_details(json!({ "template": template })),
        )
        .await;

        // ------------------------------------------------------------------
        // Enrichment
        // ------------------------------------------------------------------
        let enriched = match self.enrichment.enrich(&template).await {
            Ok(plan) => plan,
            Err(client_err) => {
                self.record(AuditEntry::failed(
                    workflow_id.as_str(),
                    event,
                    AuditAction::PlmConsultation,
                    client_err.to_string(),
                ))
                .await;
                return Err(EngineError::Consultation(client_err));
            }
        };

        let unresolved = unresolved_components(&enriched);
        if !unresolved.is_empty() {
            let err = EngineError::Unresolved { components: unresolved };
            self.record(AuditEntry::failed(
                workflow_id.as_str(),
                event,
                AuditAction::PlmConsultation,
                err.to_string(),
            ))
            .await;
            return Err(err);
        }

        self.record(
            AuditEntry::success(workflow_id.as_str(), event, AuditAction::PlmConsultation)
                .with_details(json!({ "enriched_plan": enriched })),
        )
        .await;

        // ------------------------------------------------------------------
        // Rendering
        // ------------------------------------------------------------------
        let document_plan = build_document_plan(&release, &enriched);
        info!(
            "rendering {} components for {}",
            document_plan.body.len(),
            release.product_name
        );

        let rendered = match self.render.render(&document_plan).await {
            Ok(rendered) => rendered,
            Err(client_err) => {
                self.record(AuditEntry::failed(
                    workflow_id.as_str(),
                    event,
                    AuditAction::DocgenCommand,
                    client_err.to_string(),
                ))
                .await;
                return Err(EngineError::Command(client_err));
            }
        };

        self.record(
            AuditEntry::success(workflow_id.as_str(), event, AuditAction::DocgenCommand)
                .with_details(json!({
                    "document_url": rendered.url,
                    "filename": rendered.filename,
                    "generation_time_ms": rendered.generation_time_ms,
                })),
        )
        .await;

        self.record(
            AuditEntry::success(workflow_id.as_str(), event, AuditAction::WorkflowCompleted)
                .with_details(json!({ "final_document_url": rendered.url })),
        )
        .await;

        Ok(WorkflowResponse::completed(workflow_id.clone(), rendered.url))
    }

    /// Append to the audit log; a failed write never stops the run.
    async fn record(&self, entry: AuditEntry) {
        let action = entry.action.clone();
        if let Err(e) = self.audit.append(entry).await {
            warn!("failed to write '{}' audit entry: {}", action, e);
        }
    }
}
