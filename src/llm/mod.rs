pub mod gemini;
pub mod provider;
pub mod types;

use crate::errors::TrustlensError;

pub use provider::LlmProvider;
pub use types::LlmResponse;

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
) -> Result<Box<dyn LlmProvider>, TrustlensError> {
    match provider_name {
        "gemini" => Ok(Box::new(gemini::GeminiProvider::new(api_key, model))),
        other => Err(TrustlensError::Config(format!(
            "Unknown LLM provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_provider() {
        let provider = create_provider("gemini", "key", Some("gemini-2.5-pro")).unwrap();
        assert_eq!(provider.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        assert!(matches!(
            create_provider("parrot", "key", None),
            Err(TrustlensError::Config(_))
        ));
    }
}
