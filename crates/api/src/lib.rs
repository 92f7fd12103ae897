//! `api` crate — HTTP layer in front of the workflow engine.
//!
//! Exposes:
//!   POST   /v1/execute-workflow
//!   GET    /v1/workflows
//!   GET    /v1/workflows/{id}
//!   GET    /v1/audit[?workflow_id=...]
//!   GET    /v1/metrics
//!   GET    /health

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use error::{ApiError, ErrorBody};
pub use handlers::AppState;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/execute-workflow", post(handlers::workflows::execute))
        .route("/v1/workflows", get(handlers::workflows::list))
        .route("/v1/workflows/:id", get(handlers::workflows::get))
        .route("/v1/audit", get(handlers::audit_trail::list))
        .route("/v1/metrics", get(handlers::metrics::metrics))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
