pub mod bandit;
pub mod semgrep;
pub mod snippet;

use crate::classify::StructuredMetadata;

/// A scanner record reduced to the common shape the pipeline understands.
/// Producing these is the only scanner-specific step; everything downstream
/// is scanner-agnostic.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub file: String,
    pub line: Option<u32>,
    pub end_line: Option<u32>,
    /// Severity label as the scanner reported it, normalized later.
    pub severity: String,
    pub issue_text: String,
    /// Code snippet as reported. `None` when the scanner omitted it or
    /// supplied a placeholder; the normalizer then reads it from disk.
    pub code: Option<String>,
    pub metadata: StructuredMetadata,
}

/// Collect string values out of a scanner metadata field that may be a
/// string, number, or list of either.
pub(crate) fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => out.push(s.clone()),
        serde_json::Value::Number(n) => out.push(n.to_string()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}
