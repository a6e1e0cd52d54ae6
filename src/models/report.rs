use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::finding::Finding;
use super::summary::Summary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub scan_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate result of one scan run. Findings keep insertion order:
/// Bandit records first, then Semgrep, discovery order within each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub metadata: ReportMetadata,
}

impl Report {
    pub fn new(summary: Summary, findings: Vec<Finding>) -> Self {
        Self {
            summary,
            findings,
            metadata: ReportMetadata {
                scan_id: Uuid::new_v4(),
                timestamp: Utc::now(),
            },
        }
    }
}
