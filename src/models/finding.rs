use serde::{Deserialize, Serialize};

/// Sentinel used when no CVE could be associated with a finding.
/// The `exploit_id` field is never empty; absence is always this value.
pub const NO_KNOWN_EXPLOIT: &str = "No known CVE mapping available";

/// Severity level for a normalized finding, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    /// High = 0, Medium = 1, Low = 2.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    /// Normalize a raw scanner severity label to the canonical three levels.
    /// Scanners disagree on vocabulary: Bandit reports HIGH/MEDIUM/LOW,
    /// Semgrep reports ERROR/WARNING/INFO. Unknown labels map to Medium.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "error" | "critical" | "high" => Severity::High,
            "warn" | "warning" | "info" | "low" => Severity::Low,
            "medium" => Severity::Medium,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scanner that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    Bandit,
    Semgrep,
}

impl ScannerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerKind::Bandit => "Bandit",
            ScannerKind::Semgrep => "Semgrep",
        }
    }
}

impl std::fmt::Display for ScannerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM-produced analysis attached to a finding during enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub explanation: String,
    pub fix: String,
}

/// One normalized vulnerability occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub scanner: ScannerKind,
    pub file: String,
    pub line: Option<u32>,
    pub severity: Severity,
    pub issue_text: String,
    pub code: Option<String>,
    /// Canonical `CWE-<digits>` identifier. `None` means the finding could
    /// not be classified; display layers render that as "N/A".
    pub classification_id: Option<String>,
    pub classification_title: Option<String>,
    /// OWASP Top 10 label, backfilled just before the report is persisted.
    pub risk_category: Option<String>,
    /// Canonical `CVE-<yyyy>-<digits>` or [`NO_KNOWN_EXPLOIT`].
    pub exploit_id: String,
    pub enrichment: Option<Enrichment>,
}

impl Finding {
    /// Identity key for deduplication. Two findings are the same occurrence
    /// when file, line, normalized issue text, and classification agree.
    pub fn identity(&self) -> (String, Option<u32>, String, Option<String>) {
        (
            self.file.clone(),
            self.line,
            crate::normalize::normalize_issue_text(&self.issue_text),
            self.classification_id.clone(),
        )
    }
}
