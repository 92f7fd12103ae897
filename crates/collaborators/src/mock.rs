//! Test doubles for [`EnrichmentService`] and [`RenderService`].
//!
//! Each mock records every request it receives and answers with a
//! programmer-specified result.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::{
    ClientError, DocumentPlan, EnrichedComponent, EnrichedPlan, EnrichmentService,
    RenderResponse, RenderService, TemplatePlan,
};

/// Behaviour injected into `MockEnrichment` at construction time.
pub enum EnrichBehaviour {
    /// Return this plan regardless of the request.
    Return(EnrichedPlan),
    /// Echo the template back with every voltage set to this value.
    Resolve(String),
    /// Fail with this error.
    Fail(ClientError),
}

pub struct MockEnrichment {
    pub behaviour: EnrichBehaviour,
    /// All templates seen by this mock (in call order).
    pub calls: Arc<Mutex<Vec<TemplatePlan>>>,
}

impl MockEnrichment {
    pub fn returning(plan: EnrichedPlan) -> Self {
        Self::with(EnrichBehaviour::Return(plan))
    }

    pub fn resolving(voltage: impl Into<String>) -> Self {
        Self::with(EnrichBehaviour::Resolve(voltage.into()))
    }

    pub fn failing(err: ClientError) -> Self {
        Self::with(EnrichBehaviour::Fail(err))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn with(behaviour: EnrichBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl EnrichmentService for MockEnrichment {
    async fn enrich(&self, template: &TemplatePlan) -> Result<EnrichedPlan, ClientError> {
        self.calls.lock().unwrap().push(template.clone());

        match &self.behaviour {
            EnrichBehaviour::Return(plan) => Ok(plan.clone()),
            EnrichBehaviour::Resolve(voltage) => Ok(EnrichedPlan {
                product: template.product.clone(),
                components: template
                    .components
                    .iter()
                    .map(|c| EnrichedComponent {
                        name: c.name.clone(),
                        voltage: voltage.clone(),
                    })
                    .collect(),
            }),
            EnrichBehaviour::Fail(err) => Err(err.clone()),
        }
    }
}

pub struct MockRender {
    pub result: Result<RenderResponse, ClientError>,
    /// All plans seen by this mock (in call order).
    pub calls: Arc<Mutex<Vec<DocumentPlan>>>,
}

impl MockRender {
    pub fn returning(response: RenderResponse) -> Self {
        Self {
            result: Ok(response),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(err: ClientError) -> Self {
        Self {
            result: Err(err),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent plan this mock was asked to render.
    pub fn last_plan(&self) -> Option<DocumentPlan> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RenderService for MockRender {
    async fn render(&self, plan: &DocumentPlan) -> Result<RenderResponse, ClientError> {
        self.calls.lock().unwrap().push(plan.clone());
        self.result.clone()
    }
}
