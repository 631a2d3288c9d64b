use serde::{Deserialize, Serialize};

use super::domain::MatchResult;
use super::evaluation::ScoringConfig;

const MAX_SUGGESTED_CRITERIA: usize = 3;

/// Order results by score, highest first. Ties keep catalog order.
pub fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|left, right| right.score.total_cmp(&left.score));
    results
}

/// Plain-text recommendation whose tone follows the score band.
pub fn recommendation(
    category: &str,
    score: f64,
    matched: &[String],
    unmet: &[&str],
    config: &ScoringConfig,
) -> String {
    let suggested: Vec<&str> = unmet.iter().copied().take(MAX_SUGGESTED_CRITERIA).collect();

    if score >= config.thresholds.eligible {
        if matched.is_empty() {
            format!("Excellent alignment with {category}. Strong overall evidence found in the document.")
        } else {
            format!(
                "Excellent alignment with {category}. Strong evidence found for {}.",
                matched.join(", ")
            )
        }
    } else if score >= config.thresholds.partial {
        if suggested.is_empty() {
            format!(
                "Good potential for {category}. Consider strengthening documentation for additional criteria to improve eligibility."
            )
        } else {
            format!(
                "Good potential for {category}. Consider strengthening documentation for {}.",
                suggested.join(", ")
            )
        }
    } else if suggested.is_empty() {
        format!(
            "Limited alignment with {category}. Focus on developing initiatives that address the specific criteria for this award."
        )
    } else {
        format!(
            "Limited alignment with {category}. Focus on developing initiatives that address: {}.",
            suggested.join(", ")
        )
    }
}

/// Three-sentence digest stored alongside an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub overview: String,
    pub insight: String,
    pub evidence_guidance: String,
}

impl AnalysisSummary {
    /// Summarize ranked results; only the top result is considered.
    pub fn from_results(results: &[MatchResult]) -> Self {
        match results.first() {
            None => Self {
                overview: "No strong award matches found in the current document.".to_string(),
                insight: "Consider reviewing content alignment with the award criteria.".to_string(),
                evidence_guidance: "Focus on developing measurable outcomes and strategic documentation."
                    .to_string(),
            },
            Some(top) => Self {
                overview: format!(
                    "Strongest alignment found with {} (score {:.2}%, {}).",
                    top.category,
                    top.score,
                    top.status.label()
                ),
                insight: format!(
                    "Consider strengthening evidence for {} criteria.",
                    top.category
                ),
                evidence_guidance: format!(
                    "{} of {} criteria are evidenced in the extracted text.",
                    top.checklist.criteria_met, top.checklist.total_criteria
                ),
            },
        }
    }

    pub fn sentences(&self) -> [&str; 3] {
        [&self.overview, &self.insight, &self.evidence_guidance]
    }
}
