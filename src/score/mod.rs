use std::path::Path;

use tracing::debug;

use crate::models::finding::{Finding, Severity};
use crate::models::summary::{SeverityCounts, Summary, TrustExplanation};

const BASE_SCORE: u32 = 100;
const SCORE_FLOOR: f64 = 5.0;
const PENALTY_HIGH: usize = 7;
const PENALTY_MEDIUM: usize = 3;
const PENALTY_LOW: usize = 1;
/// File count at which the size factor reaches ln(2) ≈ 0.69.
const SIZE_PIVOT: f64 = 50.0;

/// Reduce a finding population to severity counts and the trust score.
///
/// Size-aware formula: `penalty = 7h + 3m + 1l`,
/// `size_factor = ln(1 + file_count/50)`, `score = round(max(5, 100 -
/// penalty * size_factor))`. A zero file count zeroes the size factor, so
/// an empty tree scores 100 regardless of findings.
pub fn aggregate(findings: &[Finding], file_count: usize) -> Summary {
    let mut counts = SeverityCounts::default();
    for finding in findings {
        match finding.severity {
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low => counts.low += 1,
        }
    }

    let penalty_high = PENALTY_HIGH * counts.high;
    let penalty_medium = PENALTY_MEDIUM * counts.medium;
    let penalty_low = PENALTY_LOW * counts.low;
    let total_penalty = penalty_high + penalty_medium + penalty_low;

    let size_factor = if file_count > 0 {
        (1.0 + file_count as f64 / SIZE_PIVOT).ln()
    } else {
        0.0
    };

    let raw_score = BASE_SCORE as f64 - total_penalty as f64 * size_factor;
    let trust_score = raw_score.max(SCORE_FLOOR).round() as u32;

    let explanation = format!(
        "Trust Score = {base} - (({ph_w}*{h} + {pm_w}*{m} + {pl_w}*{l}) * {sf:.2}) = {base} - ({p} * {sf:.2}) = {raw:.2} (rounded to {fin}). Scanned tree = {fc} source files, size_factor = ln(1 + file_count / {pivot}) = {sf:.2}.",
        base = BASE_SCORE,
        ph_w = PENALTY_HIGH,
        pm_w = PENALTY_MEDIUM,
        pl_w = PENALTY_LOW,
        h = counts.high,
        m = counts.medium,
        l = counts.low,
        p = total_penalty,
        sf = size_factor,
        raw = raw_score.max(SCORE_FLOOR),
        fin = trust_score,
        fc = file_count,
        pivot = SIZE_PIVOT as usize,
    );

    Summary {
        trust_score,
        total_issues: counts.total(),
        trust_explanation: TrustExplanation {
            base_score: BASE_SCORE,
            penalty_high,
            penalty_medium,
            penalty_low,
            file_count,
            size_factor: (size_factor * 100.0).round() / 100.0,
            final_trust_score: trust_score,
            explanation,
        },
        counts,
    }
}

const EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "target",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "ts", "jsx", "tsx", "go", "java", "php", "rb", "cs", "c", "cpp", "h", "hpp",
];

/// Count source files under the scanned tree, for the size factor.
pub fn count_source_files(root: &Path) -> usize {
    let mut count = 0;
    walk(root, &mut count);
    debug!(root = %root.display(), count, "Source files counted");
    count
}

fn walk(dir: &Path, count: &mut usize) {
    if !dir.is_dir() {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if EXCLUDE_DIRS.contains(&name) {
            continue;
        }
        if path.is_dir() {
            walk(&path, count);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if SOURCE_EXTENSIONS.contains(&ext) {
                *count += 1;
            }
        }
    }
}
