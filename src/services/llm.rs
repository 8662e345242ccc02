use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from the text-generation collaborator
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Anything that turns a prompt into free text
///
/// Implementations report failure through the returned `Result`; callers
/// degrade to a neutral score instead of propagating.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
