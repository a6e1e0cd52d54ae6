use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::errors::TrustlensError;
use crate::models::finding::{Finding, NO_KNOWN_EXPLOIT};
use crate::models::report::Report;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 2em; background: #f9f9f9; }
    .score { font-size: 2em; margin-bottom: 0.5em; }
    .counts { margin-bottom: 1em; }
    .metadata { font-size: 0.95em; color: #555; margin-bottom: 1em; }
    .finding { background: #fff; border: 1px solid #ccc; border-radius: 8px; margin: 1em 0; padding: 1em; }
    .severity-high { color: #d32f2f; font-weight: bold; }
    .severity-medium { color: #fbc02d; font-weight: bold; }
    .severity-low { color: #388e3c; font-weight: bold; }
    pre { background: #f0f0f0; padding: 0.5em; border-radius: 4px; white-space: pre-wrap; }
    .explanation { background: #e3f2fd; padding: 0.75em; border-radius: 6px; margin: 0.6em 0 0.4em 0; border-left: 5px solid #1976d2; }
    .fix { background: #dcedc8; padding: 0.75em; border-radius: 6px; margin: 0.4em 0 0.7em 0; white-space: pre-wrap; font-family: monospace; border-left: 5px solid #558b2f; }
    .label { font-weight: bold; color: #333; }
    .section { margin-bottom: 0.5em; }
"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

/// Render the report as a single self-contained HTML document. Findings
/// that differ only by line number are grouped with an occurrence count.
pub fn render_html(report: &Report) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset='utf-8'><title>Scan Report</title>");
    html.push_str(&format!("<style>{}</style></head><body>\n", STYLE));
    html.push_str("<h1>Trustlens Scan Report</h1>\n");

    html.push_str("<div class='metadata'>");
    html.push_str(&format!(
        "<b>Scan Date:</b> {}<br>",
        report.metadata.timestamp.to_rfc3339()
    ));
    html.push_str(&format!("<b>Scan ID:</b> {}<br>", report.metadata.scan_id));
    html.push_str("<b>Scanners:</b> Bandit / Semgrep<br>");
    html.push_str("<b>CWE/CVE Mode:</b> MITRE + NVD (cached)</div>\n");

    html.push_str(&format!(
        "<div class='score'>Trust Score: <b>{}</b></div>\n",
        report.summary.trust_score
    ));

    let expl = &report.summary.trust_explanation;
    html.push_str("<details style='margin-bottom:1em'><summary>Trust Score Computation</summary>");
    html.push_str("<div style='padding:0.4em 0 0.4em 1em;'>");
    html.push_str(&format!("<b>Base Score:</b> {}<br>", expl.base_score));
    html.push_str(&format!("<b>Penalty (High):</b> {}<br>", expl.penalty_high));
    html.push_str(&format!(
        "<b>Penalty (Medium):</b> {}<br>",
        expl.penalty_medium
    ));
    html.push_str(&format!("<b>Penalty (Low):</b> {}<br>", expl.penalty_low));
    html.push_str(&format!("<b>Source File Count:</b> {}<br>", expl.file_count));
    html.push_str(&format!("<b>Size Factor:</b> {}<br>", expl.size_factor));
    html.push_str(&format!("<b>Formula:</b> {}<br>", escape(&expl.explanation)));
    html.push_str("</div></details>\n");

    let c = &report.summary.counts;
    html.push_str("<div class='counts'>");
    html.push_str(&format!(
        "High: <span class='severity-high'>{}</span> &nbsp; ",
        c.high
    ));
    html.push_str(&format!(
        "Medium: <span class='severity-medium'>{}</span> &nbsp; ",
        c.medium
    ));
    html.push_str(&format!(
        "Low: <span class='severity-low'>{}</span> &nbsp; ",
        c.low
    ));
    html.push_str(&format!(
        "Total Issues: <b>{}</b></div>\n<hr>\n",
        report.summary.total_issues
    ));

    for (finding, occurrences) in group_findings(&report.findings) {
        html.push_str(&render_finding(finding, occurrences));
    }

    html.push_str("</body></html>\n");
    html
}

/// Group findings that share (file, classification, exploit, issue text),
/// keeping first-seen order. Distinct lines in the same file collapse into
/// one card with an occurrence count.
fn group_findings(findings: &[Finding]) -> Vec<(&Finding, usize)> {
    let mut order: Vec<&Finding> = Vec::new();
    let mut counts: HashMap<(String, Option<String>, String, String), usize> = HashMap::new();

    for finding in findings {
        let key = (
            finding.file.clone(),
            finding.classification_id.clone(),
            finding.exploit_id.clone(),
            finding.issue_text.clone(),
        );
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key, 1);
                order.push(finding);
            }
        }
    }

    order
        .into_iter()
        .map(|f| {
            let key = (
                f.file.clone(),
                f.classification_id.clone(),
                f.exploit_id.clone(),
                f.issue_text.clone(),
            );
            (f, counts[&key])
        })
        .collect()
}

fn render_finding(finding: &Finding, occurrences: usize) -> String {
    let mut html = String::new();
    html.push_str("<div class='finding'>\n");

    let occ_label = if occurrences > 1 {
        format!(" (×{} occurrences)", occurrences)
    } else {
        String::new()
    };
    let line = finding
        .line
        .map(|l| l.to_string())
        .unwrap_or_else(|| "?".to_string());
    html.push_str(&format!(
        "<div class='section'><span class='label'>File:</span> {}{} &nbsp; <span class='label'>Line:</span> {} &nbsp; <span class='severity-{}'>{}</span></div>\n",
        escape(&finding.file),
        occ_label,
        line,
        finding.severity,
        finding.severity.as_str().to_uppercase(),
    ));

    match &finding.classification_id {
        Some(cwe) => {
            let num = cwe.trim_start_matches("CWE-");
            let title = finding
                .classification_title
                .as_deref()
                .map(|t| format!(" – {}", escape(t)))
                .unwrap_or_default();
            html.push_str(&format!(
                "<div class='section'><span class='label'>CWE:</span> <a href='https://cwe.mitre.org/data/definitions/{}.html' target='_blank'>{}{}</a></div>\n",
                num, cwe, title
            ));
        }
        None => {
            html.push_str("<div class='section'><span class='label'>CWE:</span> N/A</div>\n");
        }
    }

    if let Some(category) = &finding.risk_category {
        html.push_str(&format!(
            "<div class='section'><span class='label'>OWASP Top 10:</span> {}</div>\n",
            escape(category)
        ));
    }

    if finding.exploit_id == NO_KNOWN_EXPLOIT {
        html.push_str(&format!(
            "<div class='section'><span class='label'>CVE:</span> {}</div>\n",
            NO_KNOWN_EXPLOIT
        ));
    } else {
        html.push_str(&format!(
            "<div class='section'><span class='label'>CVE:</span> <a href='https://nvd.nist.gov/vuln/detail/{id}' target='_blank'>{id}</a></div>\n",
            id = finding.exploit_id
        ));
    }

    html.push_str(&format!(
        "<div class='section'><span class='label'>Issue:</span> {}</div>\n",
        escape(&finding.issue_text)
    ));

    if let Some(code) = &finding.code {
        html.push_str(&format!(
            "<div class='section'><span class='label'>Code:</span><pre>{}</pre></div>\n",
            escape(code)
        ));
    }

    if let Some(enrichment) = &finding.enrichment {
        if !enrichment.explanation.trim().is_empty() {
            html.push_str(&format!(
                "<div class='explanation'><b>Explanation:</b><br>{}</div>\n",
                escape(&enrichment.explanation).replace('\n', "<br>")
            ));
        }
        if !enrichment.fix.trim().is_empty() {
            html.push_str(&format!(
                "<div class='fix'><b>Secure Fix:</b><br>{}</div>\n",
                escape(&enrichment.fix)
            ));
        }
    }

    html.push_str("</div>\n");
    html
}

pub fn write_html_report(report: &Report, path: &Path) -> Result<(), TrustlensError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_html(report))?;
    info!(path = %path.display(), "HTML report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::{Enrichment, ScannerKind, Severity};
    use crate::score;

    fn finding(file: &str, line: u32, issue: &str) -> Finding {
        Finding {
            scanner: ScannerKind::Bandit,
            file: file.to_string(),
            line: Some(line),
            severity: Severity::High,
            issue_text: issue.to_string(),
            code: Some("eval(x) # <dangerous>".to_string()),
            classification_id: Some("CWE-95".to_string()),
            classification_title: Some("Eval Injection".to_string()),
            risk_category: Some("A03:2021 - Injection".to_string()),
            exploit_id: "CVE-2019-5418".to_string(),
            enrichment: Some(Enrichment {
                explanation: "Arbitrary code execution.".to_string(),
                fix: "Use ast.literal_eval".to_string(),
            }),
        }
    }

    fn build_report(findings: Vec<Finding>) -> Report {
        let summary = score::aggregate(&findings, 10);
        Report::new(summary, findings)
    }

    #[test]
    fn test_render_contains_key_sections() {
        let html = render_html(&build_report(vec![finding("a.py", 3, "eval use")]));
        assert!(html.contains("Trust Score"));
        assert!(html.contains("CWE-95"));
        assert!(html.contains("Eval Injection"));
        assert!(html.contains("nvd.nist.gov/vuln/detail/CVE-2019-5418"));
        assert!(html.contains("A03:2021 - Injection"));
        assert!(html.contains("Secure Fix"));
    }

    #[test]
    fn test_code_is_escaped() {
        let html = render_html(&build_report(vec![finding("a.py", 3, "eval use")]));
        assert!(html.contains("&lt;dangerous>"));
        assert!(!html.contains("<dangerous>"));
    }

    #[test]
    fn test_duplicate_findings_grouped() {
        let report = build_report(vec![
            finding("a.py", 3, "eval use"),
            finding("a.py", 9, "eval use"),
        ]);
        let html = render_html(&report);
        assert!(html.contains("×2 occurrences"));
        assert_eq!(html.matches("class='finding'").count(), 1);
    }

    #[test]
    fn test_unresolved_renders_na() {
        let mut f = finding("a.py", 3, "odd issue");
        f.classification_id = None;
        f.classification_title = None;
        f.risk_category = None;
        f.exploit_id = NO_KNOWN_EXPLOIT.to_string();
        let html = render_html(&build_report(vec![f]));
        assert!(html.contains("CWE:</span> N/A"));
        assert!(html.contains(NO_KNOWN_EXPLOIT));
    }
}
