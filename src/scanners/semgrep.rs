use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::classify::StructuredMetadata;
use crate::errors::TrustlensError;

use super::{collect_strings, RawRecord};

/// Placeholder Semgrep emits instead of a snippet when rule content is
/// gated; treated the same as an omitted snippet.
const UNAVAILABLE_SNIPPET: &str = "requires login";

/// Parse a Semgrep JSON report into raw records.
///
/// Semgrep fields: `path`, `start.line`/`end.line`, and an `extra` object
/// carrying `severity`, `message`, `lines`, `snippet`, and rule `metadata`
/// (`cwe`, `references`).
pub fn parse_report(path: &Path) -> Result<Vec<RawRecord>, TrustlensError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TrustlensError::Scanner(format!("Semgrep report unreadable: {}", e)))?;
    let data: Value = serde_json::from_str(&content)
        .map_err(|e| TrustlensError::Scanner(format!("Semgrep report is not valid JSON: {}", e)))?;

    let results = data["results"].as_array().cloned().unwrap_or_default();
    debug!(count = results.len(), "Semgrep records read");

    Ok(results.iter().map(to_record).collect())
}

fn to_record(result: &Value) -> RawRecord {
    let extra = &result["extra"];
    let meta = &extra["metadata"];

    let issue_text = extra["message"]
        .as_str()
        .or_else(|| result["check_id"].as_str())
        .unwrap_or_default()
        .to_string();

    let mut cwe_hints = Vec::new();
    collect_strings(&meta["cwe"], &mut cwe_hints);

    let mut references = Vec::new();
    collect_strings(&meta["references"], &mut references);

    RawRecord {
        file: result["path"].as_str().unwrap_or_default().to_string(),
        line: result["start"]["line"].as_u64().map(|l| l as u32),
        end_line: result["end"]["line"].as_u64().map(|l| l as u32),
        severity: extra["severity"].as_str().unwrap_or_default().to_string(),
        issue_text,
        code: extract_snippet(extra),
        metadata: StructuredMetadata {
            cwe_hints,
            references,
            more_info: meta["source"].as_str().map(str::to_string),
        },
    }
}

/// Pull the reported snippet out of `extra.lines` or `extra.snippet`
/// (string, or `{lines: [{code}]}`). Returns `None` for empty content and
/// for the "content unavailable" placeholder, so the normalizer falls back
/// to reading the source file.
fn extract_snippet(extra: &Value) -> Option<String> {
    let candidate = extra["lines"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            extra["snippet"]
                .as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .or_else(|| {
            extra["snippet"]["lines"].as_array().map(|lines| {
                lines
                    .iter()
                    .filter_map(|l| l["code"].as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        })?;

    if candidate.is_empty() || candidate.to_lowercase() == UNAVAILABLE_SNIPPET {
        None
    } else {
        Some(candidate)
    }
}
