//! Stand-in used when the real provider could not be constructed at startup.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

/// Fails every call with the reason the real provider was not built.
pub struct UnconfiguredTextProvider {
    model: String,
    reason: String,
}

impl UnconfiguredTextProvider {
    pub fn new(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextProvider for UnconfiguredTextProvider {
    async fn generate(&self, _segments: &[String]) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unconfigured"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Err(ProviderError::NotConfigured(self.reason.clone()))
    }
}
