//! `collaborators` crate — contracts and clients for the external services a
//! workflow run depends on.
//!
//! The engine talks to the product-data service through [`EnrichmentService`]
//! and to the document generator through [`RenderService`].  [`http`] holds
//! the reqwest-backed implementations; [`mock`] holds recording doubles.

pub mod error;
pub mod models;
pub mod traits;
pub mod http;
pub mod mock;

pub use error::ClientError;
pub use models::{
    ComponentInstance, ComponentTemplate, DocProps, DocumentPlan, EnrichedComponent,
    EnrichedPlan, RenderResponse, TemplatePlan, UNRESOLVED,
};
pub use traits::{EnrichmentService, RenderService};
