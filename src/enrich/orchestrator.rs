use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::cache::FileCache;
use crate::llm::LlmProvider;
use crate::models::finding::{Enrichment, Finding};

/// Findings submitted per LLM request.
pub const BATCH_SIZE: usize = 10;
/// Upper bound on concurrently dispatched batches.
pub const MAX_WORKERS: usize = 8;

/// Attached to every uncached finding when no LLM credential is configured.
pub const NOT_CONFIGURED_PLACEHOLDER: &str = "AI analysis skipped (no API key configured).";
pub const NOT_CONFIGURED_FIX: &str = "Configure an LLM API key to enable suggested fixes.";

/// Drives LLM enrichment of a finding population: builds one summary per
/// finding, consults the cache, batches the misses, and merges the results
/// back in input order. Failures degrade to placeholders; enrichment never
/// fails a run.
pub struct EnrichmentOrchestrator {
    llm: Option<Arc<dyn LlmProvider>>,
    cache: Arc<FileCache>,
    concurrent: bool,
}

impl EnrichmentOrchestrator {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>, cache: Arc<FileCache>, concurrent: bool) -> Self {
        Self {
            llm,
            cache,
            concurrent,
        }
    }

    pub async fn enrich(&self, findings: &mut [Finding]) {
        if findings.is_empty() {
            return;
        }

        let summaries: Vec<String> = findings.iter().map(build_summary).collect();
        let keys: Vec<String> = summaries.iter().map(|s| cache_key(s)).collect();

        let mut results: Vec<Option<Enrichment>> = keys
            .iter()
            .map(|key| self.cache.get::<Enrichment>(key))
            .collect();

        let uncached: Vec<usize> = (0..findings.len())
            .filter(|&i| results[i].is_none())
            .collect();
        info!(
            total = findings.len(),
            cache_hits = findings.len() - uncached.len(),
            "Enrichment cache consulted"
        );

        if !uncached.is_empty() {
            match &self.llm {
                None => {
                    for &i in &uncached {
                        results[i] = Some(Enrichment {
                            explanation: NOT_CONFIGURED_PLACEHOLDER.to_string(),
                            fix: NOT_CONFIGURED_FIX.to_string(),
                        });
                    }
                }
                Some(llm) => {
                    let batches: Vec<&[usize]> = uncached.chunks(BATCH_SIZE).collect();
                    let produced = self.run_batches(llm.as_ref(), &summaries, &batches).await;
                    for (batch, enrichments) in batches.iter().zip(produced) {
                        for (&i, enrichment) in batch.iter().zip(enrichments) {
                            results[i] = Some(enrichment);
                        }
                    }
                }
            }
        }

        for (finding, result) in findings.iter_mut().zip(results) {
            finding.enrichment = result;
        }
    }

    /// Dispatch each batch, sequentially or across a bounded worker pool.
    /// Output order matches `batches` either way.
    async fn run_batches(
        &self,
        llm: &dyn LlmProvider,
        summaries: &[String],
        batches: &[&[usize]],
    ) -> Vec<Vec<Enrichment>> {
        if self.concurrent && batches.len() > 1 {
            let pool = Arc::new(Semaphore::new(MAX_WORKERS.min(batches.len())));
            let tasks = batches.iter().map(|batch| {
                let pool = pool.clone();
                async move {
                    let _permit = pool.acquire().await.expect("Semaphore closed");
                    self.analyze_batch(llm, summaries, batch).await
                }
            });
            futures::future::join_all(tasks).await
        } else {
            let mut out = Vec::with_capacity(batches.len());
            for batch in batches {
                out.push(self.analyze_batch(llm, summaries, batch).await);
            }
            out
        }
    }

    /// Analyze one batch. The returned vector always matches the batch
    /// length; a failed call yields an error placeholder for every member
    /// of this batch only.
    async fn analyze_batch(
        &self,
        llm: &dyn LlmProvider,
        summaries: &[String],
        batch: &[usize],
    ) -> Vec<Enrichment> {
        let prompt = build_prompt(batch.iter().map(|&i| summaries[i].as_str()));

        match llm.complete(&prompt, Some(SYSTEM_PROMPT)).await {
            Ok(response) => {
                let enrichments = parse_batch_response(&response.content, batch.len());
                for (&i, enrichment) in batch.iter().zip(&enrichments) {
                    self.cache.insert(&cache_key(&summaries[i]), enrichment);
                }
                enrichments
            }
            Err(e) => {
                warn!(error = %e, size = batch.len(), "Enrichment batch failed");
                let placeholder = Enrichment {
                    explanation: format!("Error contacting AI analysis service: {}", e),
                    fix: String::new(),
                };
                vec![placeholder; batch.len()]
            }
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a senior application security engineer reviewing findings from static analysis tools.";

fn build_prompt<'a>(summaries: impl Iterator<Item = &'a str>) -> String {
    let mut numbered = String::new();
    for (idx, summary) in summaries.enumerate() {
        numbered.push_str(&format!("Vulnerability #{}:\n{}\n\n", idx + 1, summary.trim()));
    }
    format!(
        "For each finding below, do BOTH of the following:\n\
         1. In simple terms, explain what this vulnerability is and why it is a risk.\n\
         2. Provide a concise, secure code snippet to fix the vulnerability.\n\n\
         Respond ONLY with a JSON array containing one object per finding, \
         each with two fields: \"explanation\" and \"fix\".\n\n\
         Findings:\n{}",
        numbered
    )
}

/// One human-readable summary per finding; doubles as the cache key input.
pub fn build_summary(finding: &Finding) -> String {
    format!(
        "Source: {}\nFile: {}\nLine: {}\nSeverity: {}\nIssue: {}\nCode:\n{}\n",
        finding.scanner,
        finding.file,
        finding
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        finding.severity,
        finding.issue_text,
        finding.code.as_deref().unwrap_or(""),
    )
}

/// Deterministic cache key: SHA-256 hex of the summary text.
pub fn cache_key(summary: &str) -> String {
    let digest = Sha256::digest(summary.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Parse the model's JSON array reply. A reply whose length does not match
/// the batch is degraded: the raw text is duplicated across all slots
/// rather than failing the run.
fn parse_batch_response(text: &str, expected: usize) -> Vec<Enrichment> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|s| s.strip_suffix("```").unwrap_or(s))
        .unwrap_or(trimmed)
        .trim();

    if let Ok(parsed) = serde_json::from_str::<Vec<serde_json::Value>>(stripped) {
        if parsed.len() == expected {
            return parsed
                .iter()
                .map(|obj| Enrichment {
                    explanation: obj["explanation"].as_str().unwrap_or("").to_string(),
                    fix: obj["fix"].as_str().unwrap_or("").to_string(),
                })
                .collect();
        }
        debug!(
            expected,
            got = parsed.len(),
            "Batch response length mismatch, degrading"
        );
    }

    let degraded = Enrichment {
        explanation: text.to_string(),
        fix: String::new(),
    };
    vec![degraded; expected]
}
