use std::path::Path;

use tracing::info;

use crate::classify;
use crate::errors::TrustlensError;
use crate::models::report::Report;

/// Fill in the OWASP Top 10 label for every classified finding. Runs just
/// before persistence; the report is otherwise immutable after assembly.
pub fn backfill_risk_categories(report: &mut Report) {
    for finding in &mut report.findings {
        if finding.risk_category.is_none() {
            finding.risk_category = finding
                .classification_id
                .as_deref()
                .and_then(classify::risk_category_for)
                .map(str::to_string);
        }
    }
}

pub fn write_json_report(report: &mut Report, path: &Path) -> Result<(), TrustlensError> {
    backfill_risk_categories(report);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(report)?;
    std::fs::write(path, serialized)?;
    info!(path = %path.display(), "JSON report written");
    Ok(())
}
