use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::FileCache;
use crate::classify::{ClassificationResolver, CweCatalog};
use crate::config::resolve_credential;
use crate::enrich::EnrichmentOrchestrator;
use crate::errors::TrustlensError;
use crate::exploit::{ExploitCrossReferencer, NvdClient};
use crate::llm::{self, LlmProvider};
use crate::models::finding::{Finding, ScannerKind};
use crate::models::report::Report;
use crate::normalize::{dedupe, Normalizer};
use crate::scanners::{bandit, semgrep, RawRecord};
use crate::score;

const CWE_CACHE_FILE: &str = "cwe_cache.json";
const ENRICHMENT_CACHE_FILE: &str = "enrichment_cache.json";

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub bandit_report: Option<PathBuf>,
    pub semgrep_report: Option<PathBuf>,
    pub source_root: PathBuf,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    /// Literal key or `$VAR` environment reference; empty means enrichment
    /// runs in placeholder mode.
    pub llm_api_key: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub concurrent_enrichment: bool,
}

/// The full aggregation pipeline: scanner reports in, assembled Report out.
/// Nothing in here is fatal to a run; the worst case is an empty Report.
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
    enricher: EnrichmentOrchestrator,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let (cwe_cache, enrichment_cache) = match &config.cache_dir {
            Some(dir) => (
                Arc::new(FileCache::load(&dir.join(CWE_CACHE_FILE))),
                Arc::new(FileCache::load(&dir.join(ENRICHMENT_CACHE_FILE))),
            ),
            None => (
                Arc::new(FileCache::in_memory()),
                Arc::new(FileCache::in_memory()),
            ),
        };

        let catalog = Arc::new(CweCatalog::new(cwe_cache));
        let crossref = ExploitCrossReferencer::new(Arc::new(NvdClient::new()));
        let normalizer = Normalizer::new(
            ClassificationResolver::new(),
            catalog,
            crossref,
            &config.source_root,
        );

        let enricher = EnrichmentOrchestrator::new(
            build_llm(&config),
            enrichment_cache,
            config.concurrent_enrichment,
        );

        Self {
            config,
            normalizer,
            enricher,
        }
    }

    /// Run the pipeline end to end. Always yields a structurally valid
    /// Report; scanner and service failures degrade per component contract.
    pub async fn run(&self) -> Report {
        let bandit_records = load_records(self.config.bandit_report.as_deref(), ScannerKind::Bandit);
        let semgrep_records =
            load_records(self.config.semgrep_report.as_deref(), ScannerKind::Semgrep);

        let mut findings: Vec<Finding> = Vec::new();
        findings.extend(
            self.normalizer
                .normalize(bandit_records, ScannerKind::Bandit)
                .await,
        );
        findings.extend(
            self.normalizer
                .normalize(semgrep_records, ScannerKind::Semgrep)
                .await,
        );

        let before = findings.len();
        let mut findings = dedupe(findings);
        if findings.len() < before {
            info!(
                merged = before - findings.len(),
                "Duplicate findings collapsed"
            );
        }

        self.enricher.enrich(&mut findings).await;

        let file_count = score::count_source_files(&self.config.source_root);
        let summary = score::aggregate(&findings, file_count);
        info!(
            findings = findings.len(),
            trust_score = summary.trust_score,
            "Pipeline complete"
        );

        Report::new(summary, findings)
    }
}

fn build_llm(config: &PipelineConfig) -> Option<Arc<dyn LlmProvider>> {
    let key = config
        .llm_api_key
        .as_deref()
        .map(resolve_credential)
        .filter(|k| !k.is_empty() && !k.starts_with('$'))?;

    let provider_name = config.llm_provider.as_deref().unwrap_or("gemini");
    match llm::create_provider(provider_name, &key, config.llm_model.as_deref()) {
        Ok(provider) => Some(Arc::from(provider)),
        Err(e) => {
            warn!(error = %e, "LLM provider unavailable, enrichment will use placeholders");
            None
        }
    }
}

/// Read one scanner's report, treating an absent or unparseable file as
/// zero findings from that scanner.
fn load_records(path: Option<&Path>, kind: ScannerKind) -> Vec<RawRecord> {
    let Some(path) = path else {
        info!(scanner = %kind, "No report configured, skipping");
        return Vec::new();
    };
    let parsed = match kind {
        ScannerKind::Bandit => bandit::parse_report(path),
        ScannerKind::Semgrep => semgrep::parse_report(path),
    };
    match parsed {
        Ok(records) => {
            info!(scanner = %kind, count = records.len(), "Scanner report loaded");
            records
        }
        Err(e) => {
            warn!(scanner = %kind, error = %e, "Scanner report unusable, continuing without it");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_llm_without_key_is_none() {
        let config = PipelineConfig::default();
        assert!(build_llm(&config).is_none());
    }

    #[test]
    fn test_build_llm_unresolved_env_reference_is_none() {
        let config = PipelineConfig {
            llm_api_key: Some("$TRUSTLENS_UNSET_KEY".to_string()),
            ..Default::default()
        };
        assert!(build_llm(&config).is_none());
    }

    #[test]
    fn test_build_llm_with_literal_key() {
        let config = PipelineConfig {
            llm_api_key: Some("literal-key".to_string()),
            ..Default::default()
        };
        assert!(build_llm(&config).is_some());
    }

    #[test]
    fn test_load_records_missing_path_is_empty() {
        assert!(load_records(None, ScannerKind::Bandit).is_empty());
    }

    #[test]
    fn test_load_records_corrupt_report_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bandit.json");
        std::fs::write(&path, "{broken").unwrap();
        assert!(load_records(Some(&path), ScannerKind::Bandit).is_empty());
    }
}
