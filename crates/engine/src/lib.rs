//! `engine` crate — trigger models, template catalog, plan construction and
//! the workflow executor.

pub mod models;
pub mod error;
pub mod catalog;
pub mod plan;
pub mod executor;

pub use models::{SchematicRelease, TriggerEvent, WorkflowId, WorkflowKind, WorkflowResponse};
pub use error::{CatalogError, EngineError};
pub use catalog::TemplateCatalog;
pub use executor::{ExecutorConfig, WorkflowExecutor};

#[cfg(test)]
mod executor_tests;
