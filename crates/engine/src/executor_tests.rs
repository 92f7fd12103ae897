//! Tests for the workflow execution engine.
//!
//! These use the recording collaborator mocks and `MemoryAuditLog`, so no
//! real services or files are involved except where noted.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog, AuditStatus, JsonFileAuditLog, MemoryAuditLog};
use collaborators::mock::{MockEnrichment, MockRender};
use collaborators::{ClientError, EnrichedComponent, EnrichedPlan, RenderResponse};
use serde_json::{json, Value};

use crate::{
    EngineError, ExecutorConfig, TemplateCatalog, TriggerEvent, WorkflowExecutor, WorkflowId,
};

const EVENT: &str = "schematic.released";

fn trigger(payload: Value) -> TriggerEvent {
    TriggerEvent::new(EVENT, payload.as_object().cloned().unwrap_or_default())
}

fn widget_plan() -> EnrichedPlan {
    EnrichedPlan {
        product: "WidgetX".into(),
        components: vec![EnrichedComponent {
            name: "PowerTest".into(),
            voltage: "5V".into(),
        }],
    }
}

fn rendered() -> RenderResponse {
    RenderResponse {
        status: "success".into(),
        url: "gcs://bucket/f.docx".into(),
        filename: "WidgetX-DVT-Procedure-Rev-B.docx".into(),
        generation_time_ms: 120,
        components_rendered: 2,
    }
}

struct Harness {
    enrichment: Arc<MockEnrichment>,
    render: Arc<MockRender>,
    audit: Arc<MemoryAuditLog>,
    executor: WorkflowExecutor,
}

fn harness(enrichment: MockEnrichment, render: MockRender) -> Harness {
    harness_with(enrichment, render, MemoryAuditLog::new(), ExecutorConfig::default())
}

fn harness_with(
    enrichment: MockEnrichment,
    render: MockRender,
    audit: MemoryAuditLog,
    config: ExecutorConfig,
) -> Harness {
    let enrichment = Arc::new(enrichment);
    let render = Arc::new(render);
    let audit = Arc::new(audit);
    let executor = WorkflowExecutor::new(
        enrichment.clone(),
        render.clone(),
        audit.clone(),
        config,
    );
    Harness { enrichment, render, audit, executor }
}

fn trail(entries: &[AuditEntry]) -> Vec<(AuditAction, AuditStatus)> {
    entries.iter().map(|e| (e.action.clone(), e.status.clone())).collect()
}

// ============================================================
// Happy path
// ============================================================

#[tokio::test]
async fn widget_release_completes_with_five_entry_trail() {
    let h = harness(MockEnrichment::returning(widget_plan()), MockRender::returning(rendered()));
    let id = WorkflowId::generate();

    let response = h
        .executor
        .execute(&id, trigger(json!({ "product_name": "WidgetX", "revision": "B" })))
        .await
        .expect("workflow should succeed");

    assert_eq!(response.status, "success");
    assert_eq!(response.workflow_id, id);
    assert_eq!(response.message, "Workflow completed successfully");
    assert_eq!(response.document_url.as_deref(), Some("gcs://bucket/f.docx"));

    let entries = h.audit.snapshot();
    assert_eq!(
        trail(&entries),
        vec![
            (AuditAction::WorkflowStarted, AuditStatus::Success),
            (AuditAction::TemplatePlanGenerated, AuditStatus::Success),
            (AuditAction::PlmConsultation, AuditStatus::Success),
            (AuditAction::DocgenCommand, AuditStatus::Success),
            (AuditAction::WorkflowCompleted, AuditStatus::Success),
        ]
    );
    assert!(entries.iter().all(|e| e.workflow_id == id.as_str() && e.event == EVENT));

    assert_eq!(entries[0].details, Some(json!({ "product_name": "WidgetX", "revision": "B" })));
    assert_eq!(
        entries[1].details,
        Some(json!({
            "template": { "product": "WidgetX", "components": [ { "name": "PowerTest", "voltage": "UNRESOLVED" } ] }
        }))
    );
    assert_eq!(entries[2].details.as_ref().unwrap()["enriched_plan"]["components"][0]["voltage"], "5V");
    assert_eq!(
        entries[3].details,
        Some(json!({
            "document_url": "gcs://bucket/f.docx",
            "filename": "WidgetX-DVT-Procedure-Rev-B.docx",
            "generation_time_ms": 120
        }))
    );
    assert_eq!(entries[4].detail_str("final_document_url"), Some("gcs://bucket/f.docx"));
}

#[tokio::test]
async fn render_request_is_built_from_enriched_plan() {
    let plan = EnrichedPlan {
        product: "WidgetX".into(),
        components: vec![
            EnrichedComponent { name: "PowerTest".into(), voltage: "5V".into() },
            EnrichedComponent { name: "RippleTest".into(), voltage: "12V".into() },
        ],
    };
    let h = harness(MockEnrichment::returning(plan), MockRender::returning(rendered()));

    h.executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX", "revision": "B" })))
        .await
        .unwrap();

    let sent = h.render.last_plan().expect("render should be called");
    assert_eq!(
        sent.doc_props.unwrap().filename.as_deref(),
        Some("WidgetX-DVT-Procedure-Rev-B")
    );
    let kinds: Vec<_> = sent.body.iter().map(|c| c.component.as_str()).collect();
    assert_eq!(kinds, vec!["DocumentTitle", "TestBlock", "TestBlock"]);
    assert_eq!(sent.body[1].props["test_name"], "PowerTest");
    assert_eq!(sent.body[2].props["voltage"], "12V");
}

#[tokio::test]
async fn missing_revision_defaults_to_a() {
    let h = harness(MockEnrichment::resolving("5V"), MockRender::returning(rendered()));

    h.executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX" })))
        .await
        .unwrap();

    let sent = h.render.last_plan().unwrap();
    assert_eq!(
        sent.doc_props.unwrap().filename.as_deref(),
        Some("WidgetX-DVT-Procedure-Rev-A")
    );
    assert_eq!(h.audit.snapshot()[0].detail_str("revision"), Some("A"));
}

#[tokio::test]
async fn catalog_product_line_drives_template() {
    let catalog = TemplateCatalog::from_json(
        r#"{ "default": ["PowerTest"], "product_lines": { "ROUTER-100": ["PowerTest", "ThermalTest"] } }"#,
    )
    .unwrap();
    let h = harness_with(
        MockEnrichment::resolving("3.3V"),
        MockRender::returning(rendered()),
        MemoryAuditLog::new(),
        ExecutorConfig { catalog },
    );

    h.executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "ROUTER-100", "revision": "C" })))
        .await
        .unwrap();

    let template = h.enrichment.calls.lock().unwrap()[0].clone();
    let names: Vec<_> = template.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["PowerTest", "ThermalTest"]);
    assert_eq!(h.render.last_plan().unwrap().body.len(), 3);
}

// ============================================================
// Failure paths
// ============================================================

#[tokio::test]
async fn enrichment_failure_stops_before_render() {
    let h = harness(
        MockEnrichment::failing(ClientError::Status {
            service: "PLM",
            status: 404,
            body: "Product WidgetX not found in PLM system".into(),
        }),
        MockRender::returning(rendered()),
    );

    let err = h
        .executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX" })))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Consultation(ClientError::Status { status: 404, .. })));
    assert!(err.to_string().starts_with("PLM consultation failed: "));
    assert_eq!(h.render.call_count(), 0);

    let entries = h.audit.snapshot();
    assert_eq!(
        trail(&entries),
        vec![
            (AuditAction::WorkflowStarted, AuditStatus::Success),
            (AuditAction::TemplatePlanGenerated, AuditStatus::Success),
            (AuditAction::PlmConsultation, AuditStatus::Failed),
        ]
    );
    assert_eq!(
        entries[2].error.as_deref(),
        Some("PLM service returned 404: Product WidgetX not found in PLM system")
    );
}

#[tokio::test]
async fn render_failure_is_audited_and_wrapped() {
    let h = harness(
        MockEnrichment::returning(widget_plan()),
        MockRender::failing(ClientError::Transport {
            service: "DocGen",
            message: "connection refused".into(),
        }),
    );

    let err = h
        .executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX", "revision": "B" })))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Command(ClientError::Transport { .. })));
    assert_eq!(
        err.to_string(),
        "DocGen command failed: failed to call DocGen service: connection refused"
    );

    let entries = h.audit.snapshot();
    assert_eq!(
        trail(&entries),
        vec![
            (AuditAction::WorkflowStarted, AuditStatus::Success),
            (AuditAction::TemplatePlanGenerated, AuditStatus::Success),
            (AuditAction::PlmConsultation, AuditStatus::Success),
            (AuditAction::DocgenCommand, AuditStatus::Failed),
        ]
    );
    assert!(entries[3].error.as_deref().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn unresolved_enrichment_is_a_consultation_failure() {
    let h = harness(MockEnrichment::resolving("UNRESOLVED"), MockRender::returning(rendered()));

    let err = h
        .executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX" })))
        .await
        .unwrap_err();

    assert!(matches!(&err, EngineError::Unresolved { components } if components == &["PowerTest"]));
    assert_eq!(h.render.call_count(), 0);
    let last = h.audit.snapshot().pop().unwrap();
    assert_eq!(
        (last.action.clone(), last.status.clone()),
        (AuditAction::PlmConsultation, AuditStatus::Failed)
    );
}

#[tokio::test]
async fn missing_product_name_writes_no_audit_entry() {
    let h = harness(MockEnrichment::resolving("5V"), MockRender::returning(rendered()));

    let err = h
        .executor
        .execute(&WorkflowId::generate(), trigger(json!({ "revision": "B" })))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Validation(_)));
    assert!(err.is_client_error());
    assert!(h.audit.snapshot().is_empty());
    assert_eq!(h.enrichment.call_count(), 0);
}

#[tokio::test]
async fn unknown_event_runs_nothing() {
    let h = harness(MockEnrichment::resolving("5V"), MockRender::returning(rendered()));

    let err = h
        .executor
        .execute(
            &WorkflowId::generate(),
            TriggerEvent::new("layout.approved", json!({ "product_name": "WidgetX" }).as_object().cloned().unwrap()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unknown trigger event: layout.approved");
    assert!(err.is_client_error());
    assert!(h.audit.snapshot().is_empty());
    assert_eq!(h.enrichment.call_count(), 0);
}

#[tokio::test]
async fn audit_write_failures_do_not_abort_the_run() {
    let h = harness_with(
        MockEnrichment::returning(widget_plan()),
        MockRender::returning(rendered()),
        MemoryAuditLog::rejecting(),
        ExecutorConfig::default(),
    );

    let response = h
        .executor
        .execute(&WorkflowId::generate(), trigger(json!({ "product_name": "WidgetX" })))
        .await
        .expect("audit failures must be swallowed");

    assert_eq!(response.document_url.as_deref(), Some("gcs://bucket/f.docx"));
    assert_eq!(h.render.call_count(), 1);
}

// ============================================================
// File-backed audit log
// ============================================================

#[tokio::test]
async fn runs_share_a_file_audit_log_and_stay_separable() {
    let dir = tempfile::tempdir().unwrap();
    let audit = Arc::new(JsonFileAuditLog::new(dir.path().join("audit-log.json")));
    let ok = WorkflowExecutor::new(
        Arc::new(MockEnrichment::returning(widget_plan())),
        Arc::new(MockRender::returning(rendered())),
        audit.clone(),
        ExecutorConfig::default(),
    );
    let failing = WorkflowExecutor::new(
        Arc::new(MockEnrichment::failing(ClientError::Decode {
            service: "PLM",
            message: "expected value".into(),
        })),
        Arc::new(MockRender::returning(rendered())),
        audit.clone(),
        ExecutorConfig::default(),
    );
    let first = WorkflowId::generate();
    let second = WorkflowId::generate();

    ok.execute(&first, trigger(json!({ "product_name": "WidgetX" }))).await.unwrap();
    failing
        .execute(&second, trigger(json!({ "product_name": "WidgetX" })))
        .await
        .unwrap_err();

    assert_eq!(audit.entries().await.unwrap().len(), 8);
    assert_eq!(audit.entries_for(first.as_str()).await.unwrap().len(), 5);
    assert_eq!(audit.entries_for(second.as_str()).await.unwrap().len(), 3);
}
