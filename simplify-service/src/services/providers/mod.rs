//! Text generation provider abstraction.
//!
//! The handler only sees `TextProvider`; the Gemini client is the production
//! implementation, `UnconfiguredTextProvider` takes its place when it cannot
//! be built, and `MockTextProvider` stands in for it in tests.

pub mod gemini;
pub mod mock;
pub mod unconfigured;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered(_) => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// A generative text backend bound to one model.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send the ordered text segments as a single user turn and return the
    /// generated text.
    async fn generate(&self, segments: &[String]) -> Result<String, ProviderError>;

    /// Provider name, e.g. `gemini`.
    fn name(&self) -> &str;

    /// Model identifier every call is made against.
    fn model(&self) -> &str;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
