use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::classify::{ClassificationResolver, CweCatalog};
use crate::exploit::ExploitCrossReferencer;
use crate::models::finding::{Finding, ScannerKind, Severity};
use crate::scanners::snippet::{extract_context, CONTEXT_LINES};
use crate::scanners::RawRecord;

/// Normalize free text for finding-identity comparison: lowercase, strip
/// non-alphanumerics, collapse whitespace.
pub fn normalize_issue_text(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts raw scanner records into canonical findings, resolving each
/// record's classification and exploit reference along the way. Fully
/// materializes its output before any deduplication happens.
pub struct Normalizer {
    resolver: ClassificationResolver,
    catalog: Arc<CweCatalog>,
    crossref: ExploitCrossReferencer,
    source_root: PathBuf,
}

impl Normalizer {
    pub fn new(
        resolver: ClassificationResolver,
        catalog: Arc<CweCatalog>,
        crossref: ExploitCrossReferencer,
        source_root: &Path,
    ) -> Self {
        Self {
            resolver,
            catalog,
            crossref,
            source_root: source_root.to_path_buf(),
        }
    }

    pub async fn normalize(&self, records: Vec<RawRecord>, kind: ScannerKind) -> Vec<Finding> {
        let mut findings = Vec::with_capacity(records.len());
        for record in records {
            findings.push(self.to_finding(record, kind).await);
        }
        debug!(scanner = %kind, count = findings.len(), "Records normalized");
        findings
    }

    async fn to_finding(&self, record: RawRecord, kind: ScannerKind) -> Finding {
        let code = match record.code {
            Some(code) => Some(code),
            None => {
                let extracted = extract_context(
                    &self.source_root,
                    &record.file,
                    record.line,
                    record.end_line,
                    CONTEXT_LINES,
                );
                (!extracted.is_empty()).then_some(extracted)
            }
        };

        let classification_id = self.resolver.resolve(&record.issue_text, &record.metadata);

        let classification_title = match &classification_id {
            Some(id) => {
                let details = self.catalog.get_details(id).await;
                (!details.title.is_empty()).then_some(details.title)
            }
            None => None,
        };

        // References plus the "more info" text both count as literal-CVE
        // carriers for cross-referencing.
        let mut references = record.metadata.references.clone();
        if let Some(more_info) = &record.metadata.more_info {
            references.push(more_info.clone());
        }
        let exploit_id = self
            .crossref
            .cross_reference(
                classification_id.as_deref(),
                &record.issue_text,
                &references,
            )
            .await;

        Finding {
            scanner: kind,
            file: record.file,
            line: record.line,
            severity: Severity::from_raw(&record.severity),
            issue_text: record.issue_text,
            code,
            classification_id,
            classification_title,
            risk_category: None,
            exploit_id,
            enrichment: None,
        }
    }
}

/// Collapse findings that share the identity key, keeping the occurrence
/// with the higher severity and preserving first-seen order.
pub fn dedupe(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen: HashMap<(String, Option<u32>, String, Option<String>), usize> = HashMap::new();
    let mut unique: Vec<Finding> = Vec::with_capacity(findings.len());

    for finding in findings {
        let key = finding.identity();
        match seen.get(&key) {
            None => {
                seen.insert(key, unique.len());
                unique.push(finding);
            }
            Some(&idx) => {
                if finding.severity.rank() < unique[idx].severity.rank() {
                    unique[idx] = finding;
                }
            }
        }
    }
    unique
}
