//! Shared error types for the services crate.

use thiserror::Error;

use vanguard_core::model::CurriculumError;

pub use vanguard_core::model::ProgressError;

/// Errors emitted by the generative-AI client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("no AI API key is configured")]
    MissingCredential,
    #[error("AI service returned an empty response")]
    EmptyResponse,
    #[error("AI request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
}
