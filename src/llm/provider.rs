use async_trait::async_trait;

use crate::errors::TrustlensError;

use super::types::LlmResponse;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LlmResponse, TrustlensError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
