use serde::{Deserialize, Serialize};

use super::catalog::CategoryCatalog;
use super::domain::{Category, EligibilityStatus};
use super::repository::AnalysisRecord;

/// Progress of one award across every stored analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardStatistics {
    pub award_name: String,
    pub submissions: usize,
    pub eligible: usize,
    pub partially_eligible: usize,
    /// Distinct criteria matched by at least one submission.
    pub criteria_met: usize,
    pub total_criteria: usize,
    pub progress_percentage: u8,
    pub remark: String,
}

/// Number of analyses carrying at least one result with each status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub fully_met: usize,
    pub partially_met: usize,
    pub unqualified: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub awards: Vec<AwardStatistics>,
    pub status_analysis: StatusDistribution,
    pub total_analyses: usize,
    pub has_uploads: bool,
}

impl StatisticsReport {
    /// One entry per catalog category, in catalog order.
    pub fn from_records(catalog: &CategoryCatalog, records: &[AnalysisRecord]) -> Self {
        let awards = catalog
            .categories()
            .iter()
            .map(|category| AwardStatistics::from_records(category, records))
            .collect();

        let with_status = |status: EligibilityStatus| {
            records
                .iter()
                .filter(|record| record.results.iter().any(|result| result.status == status))
                .count()
        };

        Self {
            awards,
            status_analysis: StatusDistribution {
                fully_met: with_status(EligibilityStatus::Eligible),
                partially_met: with_status(EligibilityStatus::PartiallyEligible),
                unqualified: with_status(EligibilityStatus::NotEligible),
            },
            total_analyses: records.len(),
            has_uploads: !records.is_empty(),
        }
    }
}

impl AwardStatistics {
    pub fn from_records(category: &Category, records: &[AnalysisRecord]) -> Self {
        let total_criteria = if category.criteria.is_empty() {
            category.keywords.len()
        } else {
            category.criteria.len()
        };

        let mut submissions = 0;
        let mut eligible = 0;
        let mut partially_eligible = 0;
        let mut matched: Vec<&str> = Vec::new();

        for result in records.iter().filter_map(|record| {
            record
                .results
                .iter()
                .find(|result| result.category == category.name)
        }) {
            submissions += 1;
            match result.status {
                EligibilityStatus::Eligible => eligible += 1,
                EligibilityStatus::PartiallyEligible => partially_eligible += 1,
                EligibilityStatus::NotEligible => {}
            }
            for criterion in &result.matched_criteria {
                if !matched.contains(&criterion.as_str()) {
                    matched.push(criterion);
                }
            }
        }

        let criteria_met = matched.len().min(total_criteria);
        let progress_percentage = if total_criteria > 0 {
            ((criteria_met as f64 / total_criteria as f64) * 100.0)
                .round()
                .clamp(0.0, 100.0) as u8
        } else {
            0
        };

        Self {
            award_name: category.name.clone(),
            submissions,
            eligible,
            partially_eligible,
            criteria_met,
            total_criteria,
            progress_percentage,
            remark: remark(submissions, eligible, partially_eligible),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn remark(submissions: usize, eligible: usize, partially_eligible: usize) -> String {
    if eligible > 0 {
        format!("Excellent progress - {eligible} eligible submission{}", plural(eligible))
    } else if partially_eligible > 0 {
        format!(
            "Good progress - {partially_eligible} partially eligible submission{}",
            plural(partially_eligible)
        )
    } else if submissions > 0 {
        format!(
            "{submissions} submission{} analyzed - continue improving criteria alignment",
            plural(submissions)
        )
    } else {
        "No submissions yet for this award".to_string()
    }
}
