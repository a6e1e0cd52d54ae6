use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trustlens::enrich::NOT_CONFIGURED_PLACEHOLDER;
use trustlens::models::finding::{ScannerKind, Severity, NO_KNOWN_EXPLOIT};
use trustlens::models::report::Report;
use trustlens::pipeline::{Pipeline, PipelineConfig};
use trustlens::reporting;

/// Lay out a fake scanned project: two source files the snippet reader and
/// the size factor can see.
fn create_source_tree(dir: &TempDir) -> PathBuf {
    let root = dir.path().join("project");
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("app.py"),
        "import os\nPASSWORD = 'hunter2'\nq = 'SELECT * FROM users WHERE id=' + uid\ncur.execute(q)\n",
    )
    .unwrap();
    fs::write(
        root.join("util.py"),
        "import subprocess\n\nsubprocess.call(cmd, shell=True)\n\nimport hashlib\n\nh = hashlib.md5(data)\n",
    )
    .unwrap();
    root
}

/// Pre-seed the CWE details cache so no MITRE lookup leaves the machine.
fn seed_cwe_cache(cache_dir: &Path) {
    let entries = serde_json::json!({
        "CWE-798": {"title": "Use of Hard-coded Credentials", "description": ""},
        "CWE-89": {"title": "SQL Injection", "description": ""},
        "CWE-78": {"title": "OS Command Injection", "description": ""},
        "CWE-327": {"title": "Use of a Broken or Risky Cryptographic Algorithm", "description": ""}
    });
    fs::create_dir_all(cache_dir).unwrap();
    fs::write(
        cache_dir.join("cwe_cache.json"),
        serde_json::to_string_pretty(&entries).unwrap(),
    )
    .unwrap();
}

fn write_bandit_report(dir: &Path) -> PathBuf {
    let body = serde_json::json!({
        "results": [
            {
                "filename": "app.py",
                "line_number": 2,
                "issue_severity": "HIGH",
                "issue_text": "hardcoded password found",
                "code": "PASSWORD = 'hunter2'",
                "issue_cwe": {"id": 798, "link": "https://cwe.mitre.org/data/definitions/798.html"}
            },
            {
                "filename": "app.py",
                "line_number": 4,
                "issue_severity": "LOW",
                "issue_text": "possible sql injection found",
                "code": "cur.execute(q)"
            },
            {
                "filename": "app.py",
                "line_number": 4,
                "issue_severity": "HIGH",
                "issue_text": "Possible SQL Injection found!",
                "code": "cur.execute(q)"
            }
        ]
    });
    let path = dir.join("bandit_output.json");
    fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn write_semgrep_report(dir: &Path) -> PathBuf {
    let body = serde_json::json!({
        "results": [
            {
                "check_id": "python.lang.security.audit.subprocess-shell-true",
                "path": "util.py",
                "start": {"line": 3},
                "end": {"line": 3},
                "extra": {
                    "severity": "ERROR",
                    "message": "subprocess call with shell=True, exploited in the wild by CVE-2014-6271",
                    "metadata": {"cwe": ["CWE-78: OS Command Injection"]}
                }
            },
            {
                "check_id": "python.lang.security.audit.md5-used",
                "path": "util.py",
                "start": {"line": 7},
                "extra": {
                    "severity": "WARNING",
                    "message": "weak md5 hash used for security purposes",
                    "lines": "h = hashlib.md5(data)"
                }
            }
        ]
    });
    let path = dir.join("semgrep_output.json");
    fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn pipeline_config(dir: &TempDir) -> PipelineConfig {
    let source_root = create_source_tree(dir);
    let scans = dir.path().join("scans");
    fs::create_dir_all(&scans).unwrap();
    let cache_dir = dir.path().join("cache");
    seed_cwe_cache(&cache_dir);

    PipelineConfig {
        bandit_report: Some(write_bandit_report(&scans)),
        semgrep_report: Some(write_semgrep_report(&scans)),
        source_root,
        llm_provider: None,
        llm_model: None,
        llm_api_key: None,
        cache_dir: Some(cache_dir),
        concurrent_enrichment: false,
    }
}

#[tokio::test]
async fn test_full_pipeline_two_scanners() {
    let dir = TempDir::new().unwrap();
    let report = Pipeline::new(pipeline_config(&dir)).run().await;

    // Three Bandit records collapse to two (the SQL injection pair shares
    // file/line/normalized text/classification); Semgrep adds two more.
    assert_eq!(report.findings.len(), 4);

    // Insertion order: Bandit first, then Semgrep.
    assert_eq!(report.findings[0].scanner, ScannerKind::Bandit);
    assert_eq!(report.findings[1].scanner, ScannerKind::Bandit);
    assert_eq!(report.findings[2].scanner, ScannerKind::Semgrep);
    assert_eq!(report.findings[3].scanner, ScannerKind::Semgrep);

    // Metadata CWE short-circuits the keyword table.
    let hardcoded = &report.findings[0];
    assert_eq!(hardcoded.classification_id.as_deref(), Some("CWE-798"));
    assert_eq!(
        hardcoded.classification_title.as_deref(),
        Some("Use of Hard-coded Credentials")
    );
    // CWE-798 has no static CVE entry and the live lookup is unreachable.
    assert_eq!(hardcoded.exploit_id, NO_KNOWN_EXPLOIT);

    // Dedup kept the higher-severity duplicate.
    let sql = &report.findings[1];
    assert_eq!(sql.classification_id.as_deref(), Some("CWE-89"));
    assert_eq!(sql.severity, Severity::High);
    // Static table, most recent year wins.
    assert_eq!(sql.exploit_id, "CVE-2023-34362");

    // Literal CVE in the issue text is used verbatim.
    let shell = &report.findings[2];
    assert_eq!(shell.classification_id.as_deref(), Some("CWE-78"));
    assert_eq!(shell.exploit_id, "CVE-2014-6271");
    assert_eq!(shell.severity, Severity::High);
    // Snippet was recovered from the source file (line 3 ± 2 context).
    let code = shell.code.as_deref().unwrap();
    assert!(code.contains("subprocess.call(cmd, shell=True)"));

    // Keyword fallback plus deterministic table selection.
    let md5 = &report.findings[3];
    assert_eq!(md5.classification_id.as_deref(), Some("CWE-327"));
    assert_eq!(md5.exploit_id, "CVE-2016-2183");
    assert_eq!(md5.severity, Severity::Low);

    // No API key configured: every finding carries the exact placeholder.
    for finding in &report.findings {
        assert_eq!(
            finding.enrichment.as_ref().unwrap().explanation,
            NOT_CONFIGURED_PLACEHOLDER
        );
    }

    // Size-aware trust score over 2 source files: 3 high + 1 low.
    assert_eq!(report.summary.counts.high, 3);
    assert_eq!(report.summary.counts.medium, 0);
    assert_eq!(report.summary.counts.low, 1);
    assert_eq!(report.summary.total_issues, 4);
    let expected = (100.0 - 22.0 * (1.0_f64 + 2.0 / 50.0).ln()).round() as u32;
    assert_eq!(report.summary.trust_score, expected);
    assert_eq!(report.summary.trust_explanation.file_count, 2);
}

#[tokio::test]
async fn test_missing_reports_yield_valid_empty_report() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        bandit_report: Some(dir.path().join("no_bandit.json")),
        semgrep_report: None,
        source_root: dir.path().join("nowhere"),
        ..Default::default()
    };
    let report = Pipeline::new(config).run().await;

    assert!(report.findings.is_empty());
    assert_eq!(report.summary.trust_score, 100);
    assert_eq!(report.summary.total_issues, 0);
}

#[tokio::test]
async fn test_corrupt_report_isolated_to_one_scanner() {
    let dir = TempDir::new().unwrap();
    let mut config = pipeline_config(&dir);
    fs::write(config.bandit_report.as_ref().unwrap(), "{broken json").unwrap();
    config.semgrep_report = Some(write_semgrep_report(&dir.path().join("scans")));

    let report = Pipeline::new(config).run().await;

    // Bandit contributed nothing; the Semgrep findings survived.
    assert_eq!(report.findings.len(), 2);
    assert!(report
        .findings
        .iter()
        .all(|f| f.scanner == ScannerKind::Semgrep));
}

#[tokio::test]
async fn test_json_report_roundtrip_is_lossless() {
    let dir = TempDir::new().unwrap();
    let mut report = Pipeline::new(pipeline_config(&dir)).run().await;

    let out = dir.path().join("output").join("scan_report.json");
    reporting::write_json_report(&mut report, &out).unwrap();

    let loaded: Report = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(loaded.findings.len(), report.findings.len());
    for (a, b) in loaded.findings.iter().zip(&report.findings) {
        assert_eq!(a.scanner, b.scanner);
        assert_eq!(a.file, b.file);
        assert_eq!(a.line, b.line);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.issue_text, b.issue_text);
        assert_eq!(a.code, b.code);
        assert_eq!(a.classification_id, b.classification_id);
        assert_eq!(a.classification_title, b.classification_title);
        assert_eq!(a.risk_category, b.risk_category);
        assert_eq!(a.exploit_id, b.exploit_id);
        assert_eq!(a.enrichment, b.enrichment);
    }
    assert_eq!(loaded.summary.trust_score, report.summary.trust_score);
    assert_eq!(loaded.metadata.scan_id, report.metadata.scan_id);
    assert_eq!(loaded.metadata.timestamp, report.metadata.timestamp);

    // Backfill ran before persistence.
    let hardcoded = &loaded.findings[0];
    assert_eq!(
        hardcoded.risk_category.as_deref(),
        Some("A02:2021 - Cryptographic Failures")
    );
}

#[tokio::test]
async fn test_html_report_renders_enriched_findings() {
    let dir = TempDir::new().unwrap();
    let mut report = Pipeline::new(pipeline_config(&dir)).run().await;
    reporting::backfill_risk_categories(&mut report);

    let out = dir.path().join("output").join("scan_report.html");
    reporting::write_html_report(&report, &out).unwrap();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Trust Score"));
    assert!(html.contains("CWE-798"));
    assert!(html.contains("CVE-2014-6271"));
    assert!(html.contains("A03:2021 - Injection"));
}
