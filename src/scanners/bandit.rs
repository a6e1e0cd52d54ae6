use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::classify::StructuredMetadata;
use crate::errors::TrustlensError;

use super::{collect_strings, RawRecord};

/// Parse a Bandit JSON report into raw records.
///
/// Bandit fields: `filename`, `line_number`, `issue_severity`, `issue_text`,
/// `code`, `more_info`, and (newer releases) `issue_cwe: {id, link}`.
pub fn parse_report(path: &Path) -> Result<Vec<RawRecord>, TrustlensError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TrustlensError::Scanner(format!("Bandit report unreadable: {}", e)))?;
    let data: Value = serde_json::from_str(&content)
        .map_err(|e| TrustlensError::Scanner(format!("Bandit report is not valid JSON: {}", e)))?;

    let results = data["results"].as_array().cloned().unwrap_or_default();
    debug!(count = results.len(), "Bandit records read");

    Ok(results.iter().map(to_record).collect())
}

fn to_record(result: &Value) -> RawRecord {
    let mut cwe_hints = Vec::new();
    // Structured CWE annotation: {"id": 798, "link": "..."}.
    if let Some(id) = result["issue_cwe"]["id"].as_u64() {
        cwe_hints.push(format!("CWE-{}", id));
    }
    if let Some(link) = result["issue_cwe"]["link"].as_str() {
        cwe_hints.push(link.to_string());
    }
    collect_strings(&result["cwe"], &mut cwe_hints);

    let mut references = Vec::new();
    collect_strings(&result["references"], &mut references);

    let code = result["code"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    RawRecord {
        file: result["filename"].as_str().unwrap_or_default().to_string(),
        line: result["line_number"].as_u64().map(|l| l as u32),
        end_line: None,
        severity: result["issue_severity"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        issue_text: result["issue_text"].as_str().unwrap_or_default().to_string(),
        code,
        metadata: StructuredMetadata {
            cwe_hints,
            references,
            more_info: result["more_info"].as_str().map(str::to_string),
        },
    }
}
