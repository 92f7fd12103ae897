//! Engine-level error types.

use std::path::PathBuf;

use collaborators::ClientError;
use thiserror::Error;

/// Errors produced by a workflow run.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Caller errors (nothing is audited) ------

    /// A required payload field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// No workflow is registered for this trigger event.
    #[error("unknown trigger event: {0}")]
    UnknownEvent(String),

    // ------ Collaborator errors (audited, run terminated) ------

    /// The product data service could not enrich the template.
    #[error("PLM consultation failed: {0}")]
    Consultation(#[source] ClientError),

    /// The product data service answered but left placeholders in the plan.
    #[error("PLM consultation failed: enriched plan has unresolved components: {}", components.join(", "))]
    Unresolved { components: Vec<String> },

    /// The document generator could not render the plan.
    #[error("DocGen command failed: {0}")]
    Command(#[source] ClientError),
}

impl EngineError {
    /// Whether the failure lies with the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownEvent(_))
    }
}

/// Errors loading a [`TemplateCatalog`](crate::TemplateCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read template catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product line (or the default) lists no components.
    #[error("product line '{0}' has no components")]
    EmptyProductLine(String),

    #[error("product line '{0}' has a blank component name")]
    BlankComponentName(String),

    #[error("product line '{product_line}' lists component '{component}' twice")]
    DuplicateComponent {
        product_line: String,
        component: String,
    },
}
