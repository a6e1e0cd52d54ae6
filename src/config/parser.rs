use std::path::Path;

use tracing::warn;

use crate::errors::TrustlensError;

use super::schema::CONFIG_SCHEMA;
use super::types::TrustlensConfig;

pub async fn parse_config(path: &Path) -> Result<TrustlensConfig, TrustlensError> {
    if !path.exists() {
        return Err(TrustlensError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(TrustlensError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: TrustlensConfig = serde_yaml::from_value(yaml)?;

    // Semantic conflict detection
    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), TrustlensError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| TrustlensError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| TrustlensError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| TrustlensError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        // Warn but don't fail — schema validation is advisory for now
        for msg in &messages {
            warn!(validation_error = %msg, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &TrustlensConfig) -> Result<(), TrustlensError> {
    if let Some(scanners) = &config.scanners {
        if let (Some(bandit), Some(semgrep)) = (&scanners.bandit_report, &scanners.semgrep_report) {
            if bandit == semgrep {
                return Err(TrustlensError::Config(format!(
                    "Conflicting scanner configuration: '{}' is listed as both the Bandit and Semgrep report",
                    bandit
                )));
            }
        }
    }

    // Warn if enrichment is expected but no credential is configured
    if let Some(llm) = &config.llm {
        let has_key = llm.api_key.as_ref().map_or(false, |k| !k.is_empty());
        if llm.provider.is_some() && !has_key {
            warn!("LLM provider configured but no API key provided, enrichment will be skipped");
        }
    }

    Ok(())
}
