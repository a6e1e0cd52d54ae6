use regex::Regex;

use super::keywords::KeywordTable;

/// Scanner-supplied structured metadata relevant to classification.
/// Adapters fill whatever their scanner exposes; empty fields are skipped.
#[derive(Debug, Clone, Default)]
pub struct StructuredMetadata {
    /// Raw values of scanner-specific CWE fields (may contain extra text).
    pub cwe_hints: Vec<String>,
    /// Reference URLs/strings from rule metadata.
    pub references: Vec<String>,
    /// Scanner "more info" link or text, if any.
    pub more_info: Option<String>,
}

/// Resolves a finding to a canonical `CWE-<digits>` identifier through an
/// ordered fallback chain; returns `None` when nothing matches (the
/// unresolved state — a valid terminal outcome, not an error).
pub struct ClassificationResolver {
    keywords: KeywordTable,
    cwe_pattern: Regex,
    strict_cwe: Regex,
}

impl ClassificationResolver {
    pub fn new() -> Self {
        Self::with_keywords(KeywordTable::new())
    }

    pub fn with_keywords(keywords: KeywordTable) -> Self {
        Self {
            keywords,
            cwe_pattern: Regex::new(r"(?i)CWE[-_:]?(\d+)").unwrap(),
            strict_cwe: Regex::new(r"^CWE-\d+$").unwrap(),
        }
    }

    /// Ordered fallback chain, first match wins:
    /// 1. explicit identifier in scanner metadata CWE fields,
    /// 2. identifier embedded in the issue text or "more info" text,
    /// 3. identifier inside the metadata references list,
    /// 4. keyword table match (longest key first).
    pub fn resolve(&self, issue_text: &str, metadata: &StructuredMetadata) -> Option<String> {
        for hint in &metadata.cwe_hints {
            if let Some(id) = self.canonicalize(hint) {
                return Some(id);
            }
        }

        if let Some(id) = self.canonicalize(issue_text) {
            return Some(id);
        }
        if let Some(more_info) = &metadata.more_info {
            if let Some(id) = self.canonicalize(more_info) {
                return Some(id);
            }
        }

        for reference in &metadata.references {
            if let Some(id) = self.canonicalize(reference) {
                return Some(id);
            }
        }

        self.keywords
            .lookup(issue_text)
            .map(|id| id.to_string())
            .filter(|id| self.strict_cwe.is_match(id))
    }

    /// Extract and canonicalize an identifier from free text, keeping only
    /// the `CWE-<digits>` form. Anything that fails re-validation after
    /// canonicalization is treated as no match.
    fn canonicalize(&self, text: &str) -> Option<String> {
        let digits = self
            .cwe_pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())?;
        let id = format!("CWE-{}", digits);
        self.strict_cwe.is_match(&id).then_some(id)
    }
}

impl Default for ClassificationResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ClassificationResolver {
        ClassificationResolver::new()
    }

    #[test]
    fn test_metadata_hint_short_circuits_keywords() {
        // "hardcoded password found" would keyword-match CWE-798, but the
        // metadata field must win without ever reaching the table.
        let meta = StructuredMetadata {
            cwe_hints: vec!["CWE-798".to_string()],
            ..Default::default()
        };
        assert_eq!(
            resolver().resolve("hardcoded password found", &meta),
            Some("CWE-798".to_string())
        );
    }

    #[test]
    fn test_metadata_hint_variant_separators() {
        for raw in ["CWE_89", "cwe:89", "CWE89", "CWE-89: SQL Injection"] {
            let meta = StructuredMetadata {
                cwe_hints: vec![raw.to_string()],
                ..Default::default()
            };
            assert_eq!(
                resolver().resolve("whatever", &meta),
                Some("CWE-89".to_string()),
                "failed for {raw:?}"
            );
        }
    }

    #[test]
    fn test_identifier_in_issue_text() {
        let meta = StructuredMetadata::default();
        assert_eq!(
            resolver().resolve("see CWE-22 for details", &meta),
            Some("CWE-22".to_string())
        );
    }

    #[test]
    fn test_identifier_in_more_info() {
        let meta = StructuredMetadata {
            more_info: Some("https://example.org/docs/CWE-611".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolver().resolve("xml parsing issue", &meta),
            Some("CWE-611".to_string())
        );
    }

    #[test]
    fn test_identifier_in_references() {
        let meta = StructuredMetadata {
            references: vec![
                "https://owasp.org/".to_string(),
                "https://cwe.mitre.org/data/definitions/352.html CWE-352".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            resolver().resolve("request forgery", &meta),
            Some("CWE-352".to_string())
        );
    }

    #[test]
    fn test_keyword_fallback_longest_first() {
        let meta = StructuredMetadata::default();
        assert_eq!(
            resolver().resolve("possible sql injection found", &meta),
            Some("CWE-89".to_string())
        );
        assert_eq!(
            resolver().resolve("template injection in handler", &meta),
            Some("CWE-94".to_string())
        );
    }

    #[test]
    fn test_unresolved_is_none() {
        let meta = StructuredMetadata::default();
        assert_eq!(resolver().resolve("nothing suspicious here", &meta), None);
    }

    #[test]
    fn test_garbage_hint_falls_through() {
        let meta = StructuredMetadata {
            cwe_hints: vec!["not an identifier".to_string()],
            ..Default::default()
        };
        assert_eq!(
            resolver().resolve("possible sql injection found", &meta),
            Some("CWE-89".to_string())
        );
    }
}
