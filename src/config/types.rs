use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TrustlensConfig {
    pub scanners: Option<ScannersConfig>,
    pub llm: Option<LlmConfig>,
    pub cache: Option<CacheConfig>,
    pub enrichment: Option<EnrichmentConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScannersConfig {
    /// Path to the Bandit JSON report.
    pub bandit_report: Option<String>,
    /// Path to the Semgrep JSON report.
    pub semgrep_report: Option<String>,
    /// Root of the scanned source tree, used for snippet recovery and the
    /// trust-score size factor.
    pub source_root: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LlmConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Literal key, or `$VAR` to resolve from the environment.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CacheConfig {
    /// Directory holding the lookup cache files. No directory means
    /// in-memory caches only.
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EnrichmentConfig {
    /// Dispatch enrichment batches across a bounded worker pool.
    pub concurrent: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub directory: Option<String>,
    /// Report formats to write: "json", "html".
    pub formats: Option<Vec<String>>,
}
