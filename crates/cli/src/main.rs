//! `bpo-orchestrator` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`            — start the workflow HTTP service.
//! - `audit`            — print the stored audit trail.
//! - `validate-catalog` — validate a template catalog JSON file.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use audit::{AuditLog, JsonFileAuditLog};
use collaborators::http::{HttpEnrichmentClient, HttpRenderClient};
use config::{ServeArgs, DEFAULT_AUDIT_LOG_PATH};
use engine::{ExecutorConfig, TemplateCatalog, WorkflowExecutor};

#[derive(Parser)]
#[command(
    name = "bpo-orchestrator",
    about = "Business process orchestrator for release-triggered document generation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the workflow HTTP service.
    Serve(ServeArgs),
    /// Print the stored audit trail as JSON.
    Audit {
        #[arg(long, env = "AUDIT_LOG_PATH", default_value = DEFAULT_AUDIT_LOG_PATH)]
        audit_log_path: PathBuf,
        /// Only show entries of this workflow run.
        #[arg(long)]
        workflow_id: Option<String>,
    },
    /// Validate a template catalog JSON file.
    ValidateCatalog {
        /// Path to the catalog JSON file.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await?,
        Command::Audit { audit_log_path, workflow_id } => {
            let log = JsonFileAuditLog::new(audit_log_path);
            let entries = match workflow_id {
                Some(id) => log.entries_for(&id).await?,
                None => log.entries().await?,
            };
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::ValidateCatalog { path } => match TemplateCatalog::load(&path) {
            Ok(catalog) => {
                println!("✅ Catalog is valid. Default components: {:?}", catalog.default);
                for (line, components) in &catalog.product_lines {
                    println!("   {line}: {components:?}");
                }
            }
            Err(e) => {
                eprintln!("❌ Validation failed: {e}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting BPO orchestrator on port {}", args.port);
    info!("Audit log path: {}", args.audit_log_path.display());
    info!("PLM service URL: {}", args.plm_service_url);
    info!("DocGen service URL: {}", args.docgen_service_url);

    let catalog = args.catalog()?;
    info!(
        "Template catalog: {} default components, {} product lines",
        catalog.default.len(),
        catalog.product_lines.len()
    );

    let audit = Arc::new(JsonFileAuditLog::new(args.audit_log_path.clone()));
    let executor = WorkflowExecutor::new(
        Arc::new(HttpEnrichmentClient::new(&args.plm_service_url)),
        Arc::new(HttpRenderClient::new(&args.docgen_service_url)),
        audit.clone(),
        ExecutorConfig { catalog },
    );

    let bind = args.bind_addr();
    api::serve(&bind, AppState::new(Arc::new(executor), audit))
        .await
        .with_context(|| format!("serving on {bind}"))
}
