use serde::{Deserialize, Serialize};

/// Per-severity finding counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Breakdown of how the trust score was computed, kept alongside the score
/// so reports can show the formula inputs verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustExplanation {
    pub base_score: u32,
    pub penalty_high: usize,
    pub penalty_medium: usize,
    pub penalty_low: usize,
    pub file_count: usize,
    pub size_factor: f64,
    pub final_trust_score: u32,
    pub explanation: String,
}

/// Aggregate result derived purely from the finding population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub trust_score: u32,
    pub counts: SeverityCounts,
    pub total_issues: usize,
    pub trust_explanation: TrustExplanation,
}
