//! Collaborator client error type.

use thiserror::Error;

/// Errors returned by an [`EnrichmentService`](crate::EnrichmentService) or
/// [`RenderService`](crate::RenderService) call.
///
/// None of these are retried; the engine records them and ends the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("failed to call {service} service: {message}")]
    Transport { service: &'static str, message: String },

    /// The service answered with a non-success status.
    #[error("{service} service returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// A success response whose body is not the expected shape.
    #[error("failed to decode {service} response: {message}")]
    Decode { service: &'static str, message: String },
}
