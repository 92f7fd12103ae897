//! reqwest-backed collaborator clients.
//!
//! Both clients POST a JSON body and decode a JSON answer.  There is no
//! timeout override and no retry; pooling is whatever `reqwest::Client`
//! does by default.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    ClientError, DocumentPlan, EnrichedPlan, EnrichmentService, RenderResponse, RenderService,
    TemplatePlan,
};

const PLM_SERVICE: &str = "PLM";
const DOCGEN_SERVICE: &str = "DocGen";

/// Client for the product data service (`POST /enrich-plan`).
#[derive(Debug, Clone)]
pub struct HttpEnrichmentClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEnrichmentClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/enrich-plan", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl EnrichmentService for HttpEnrichmentClient {
    async fn enrich(&self, template: &TemplatePlan) -> Result<EnrichedPlan, ClientError> {
        post_json(&self.client, PLM_SERVICE, &self.endpoint, template).await
    }
}

/// Client for the document generation service (`POST /generate`).
#[derive(Debug, Clone)]
pub struct HttpRenderClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/generate", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RenderService for HttpRenderClient {
    async fn render(&self, plan: &DocumentPlan) -> Result<RenderResponse, ClientError> {
        post_json(&self.client, DOCGEN_SERVICE, &self.endpoint, plan).await
    }
}

async fn post_json<Req, Resp>(
    client: &reqwest::Client,
    service: &'static str,
    url: &str,
    body: &Req,
) -> Result<Resp, ClientError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    debug!("POST {} ({} service)", url, service);

    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            warn!("{} request to {} failed: {}", service, url, e);
            ClientError::Transport { service, message: e.to_string() }
        })?;

    let status = response.status();
    if !status.is_success() {
        // The body is diagnostic only; an unreadable one is reported as empty.
        let body = response.text().await.unwrap_or_default();
        warn!("{} service returned {}: {}", service, status.as_u16(), body);
        return Err(ClientError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::Transport { service, message: e.to_string() })?;

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
        service,
        message: e.to_string(),
    })
}
