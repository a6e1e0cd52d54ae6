use std::path::PathBuf;

use console::style;

use crate::config::{self, TrustlensConfig};
use crate::errors::TrustlensError;
use crate::models::report::Report;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::reporting;

use super::commands::RunArgs;

const JSON_REPORT_FILE: &str = "scan_report.json";
const HTML_REPORT_FILE: &str = "scan_report.html";
/// Environment variable consulted when no API key is configured anywhere.
const DEFAULT_API_KEY_REF: &str = "$GEMINI_API_KEY";

pub async fn handle_run(args: RunArgs) -> Result<(), TrustlensError> {
    let file_config = match &args.config {
        Some(path) => config::parse_config(&PathBuf::from(path)).await?,
        None => TrustlensConfig::default(),
    };

    let pipeline_config = merge(&args, &file_config);
    let formats = file_config
        .output
        .as_ref()
        .and_then(|o| o.formats.clone())
        .unwrap_or_else(|| vec!["json".to_string(), "html".to_string()]);
    let output_dir = file_config
        .output
        .as_ref()
        .and_then(|o| o.directory.clone())
        .unwrap_or_else(|| args.output.clone());

    let pipeline = Pipeline::new(pipeline_config);
    let mut report = pipeline.run().await;

    let output_dir = PathBuf::from(output_dir);
    if formats.iter().any(|f| f == "json") {
        reporting::write_json_report(&mut report, &output_dir.join(JSON_REPORT_FILE))?;
    }
    if formats.iter().any(|f| f == "html") {
        reporting::backfill_risk_categories(&mut report);
        reporting::write_html_report(&report, &output_dir.join(HTML_REPORT_FILE))?;
    }

    print_summary(&report);
    Ok(())
}

/// Flags without defaults take precedence over the config file; flags that
/// carry a default ("source_root", "provider") yield to an explicit config
/// value.
fn merge(args: &RunArgs, file: &TrustlensConfig) -> PipelineConfig {
    let scanners = file.scanners.clone().unwrap_or_default();
    let llm = file.llm.clone().unwrap_or_default();
    let cache = file.cache.clone().unwrap_or_default();
    let enrichment = file.enrichment.clone().unwrap_or_default();

    PipelineConfig {
        bandit_report: args
            .bandit
            .clone()
            .or(scanners.bandit_report)
            .map(PathBuf::from),
        semgrep_report: args
            .semgrep
            .clone()
            .or(scanners.semgrep_report)
            .map(PathBuf::from),
        source_root: PathBuf::from(
            scanners
                .source_root
                .clone()
                .unwrap_or_else(|| args.source_root.clone()),
        ),
        llm_provider: llm.provider.or_else(|| Some(args.provider.clone())),
        llm_model: args.model.clone().or(llm.model),
        llm_api_key: Some(
            args.api_key
                .clone()
                .or(llm.api_key)
                .unwrap_or_else(|| DEFAULT_API_KEY_REF.to_string()),
        ),
        cache_dir: args
            .cache_dir
            .clone()
            .or(cache.directory)
            .map(PathBuf::from),
        concurrent_enrichment: args.concurrent || enrichment.concurrent.unwrap_or(false),
    }
}

fn print_summary(report: &Report) {
    let score = report.summary.trust_score;
    let styled_score = if score >= 80 {
        style(score).green().bold()
    } else if score >= 50 {
        style(score).yellow().bold()
    } else {
        style(score).red().bold()
    };

    println!();
    println!("  Trust Score: {}", styled_score);
    println!(
        "  Findings: {} ({} high / {} medium / {} low)",
        report.summary.total_issues,
        style(report.summary.counts.high).red(),
        style(report.summary.counts.medium).yellow(),
        style(report.summary.counts.low).green(),
    );
    println!("  Scan ID: {}", report.metadata.scan_id);
}
