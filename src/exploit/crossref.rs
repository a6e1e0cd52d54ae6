use std::sync::Arc;

use regex::Regex;

use crate::models::finding::NO_KNOWN_EXPLOIT;

use super::nvd::NvdClient;
use super::tables;

/// Selects a representative known-exploit identifier for a classified
/// finding. Preference order: literal CVE in the finding's own text or
/// references, then the static table, then a live NVD lookup; every path
/// that has to choose among candidates applies the same deterministic
/// most-recent rule.
pub struct ExploitCrossReferencer {
    nvd: Arc<NvdClient>,
    cve_pattern: Regex,
}

impl ExploitCrossReferencer {
    pub fn new(nvd: Arc<NvdClient>) -> Self {
        Self {
            nvd,
            cve_pattern: Regex::new(r"CVE-\d{4}-\d+").unwrap(),
        }
    }

    pub async fn cross_reference(
        &self,
        classification_id: Option<&str>,
        issue_text: &str,
        references: &[String],
    ) -> String {
        // A literal identifier in the finding itself is authoritative.
        if let Some(m) = self.cve_pattern.find(issue_text) {
            return m.as_str().to_string();
        }
        for reference in references {
            if let Some(m) = self.cve_pattern.find(reference) {
                return m.as_str().to_string();
            }
        }

        let Some(cwe_id) = classification_id else {
            return NO_KNOWN_EXPLOIT.to_string();
        };

        let table_candidates = tables::cves_for(cwe_id);
        if let Some(chosen) = most_recent(table_candidates.iter().copied()) {
            return chosen;
        }

        let live = self.nvd.list_known(cwe_id).await;
        if let Some(chosen) = most_recent(live.iter().map(String::as_str)) {
            return chosen;
        }

        NO_KNOWN_EXPLOIT.to_string()
    }
}

/// Deterministic selection: numerically greatest year component wins, ties
/// broken by full string comparison. Identifiers without a parseable year
/// sort last.
pub fn most_recent<'a>(candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .max_by(|a, b| cve_year(a).cmp(&cve_year(b)).then_with(|| a.cmp(b)))
        .map(str::to_string)
}

fn cve_year(cve: &str) -> u32 {
    cve.split('-')
        .nth(1)
        .and_then(|y| y.parse().ok())
        .unwrap_or(0)
}
