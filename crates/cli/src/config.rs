//! Process configuration.
//!
//! Every setting can come from a flag or its environment variable; the flag
//! wins.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use engine::TemplateCatalog;

pub const DEFAULT_AUDIT_LOG_PATH: &str = "/app/data/audit-log.json";

/// Settings for `serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port the HTTP service listens on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON file holding the audit trail.
    #[arg(long, env = "AUDIT_LOG_PATH", default_value = DEFAULT_AUDIT_LOG_PATH)]
    pub audit_log_path: PathBuf,

    /// Base URL of the product data (PLM) service.
    #[arg(long, env = "PLM_SERVICE_URL", default_value = "http://localhost:8081")]
    pub plm_service_url: String,

    /// Base URL of the document generation service.
    #[arg(long, env = "DOCGEN_SERVICE_URL", default_value = "http://localhost:8082")]
    pub docgen_service_url: String,

    /// Template catalog JSON file; the built-in catalog is used when absent.
    #[arg(long, env = "TEMPLATE_CATALOG_PATH")]
    pub template_catalog: Option<PathBuf>,
}

impl ServeArgs {
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn catalog(&self) -> anyhow::Result<TemplateCatalog> {
        match &self.template_catalog {
            Some(path) => TemplateCatalog::load(path)
                .with_context(|| format!("loading template catalog {}", path.display())),
            None => Ok(TemplateCatalog::default()),
        }
    }
}
