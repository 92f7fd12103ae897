//! The service traits — the contract each collaborator client must fulfil.

use async_trait::async_trait;

use crate::{ClientError, DocumentPlan, EnrichedPlan, RenderResponse, TemplatePlan};

/// Resolves the placeholder values of a template plan.
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    async fn enrich(&self, template: &TemplatePlan) -> Result<EnrichedPlan, ClientError>;
}

/// Renders a document plan into a stored document.
#[async_trait]
pub trait RenderService: Send + Sync {
    async fn render(&self, plan: &DocumentPlan) -> Result<RenderResponse, ClientError>;
}
