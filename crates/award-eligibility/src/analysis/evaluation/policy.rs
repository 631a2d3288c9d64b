use serde::{Deserialize, Serialize};

use super::super::document::DocumentText;
use super::super::domain::{Category, EligibilityStatus};
use super::config::ScoringConfig;

const GENERIC_SHARE_LIMIT: f64 = 0.8;
const GENERIC_MIN_MATCHED: usize = 3;

/// Reason a scored category is kept out of the result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Exclusion {
    MissingRequiredTerms { required: Vec<String> },
    GenericOverlap { generic: usize, matched: usize },
    BelowInclusionThreshold { score: f64, threshold: f64 },
}

impl Exclusion {
    pub fn summary(&self) -> String {
        match self {
            Exclusion::MissingRequiredTerms { required } => format!(
                "excluded: none of the required terms present ({})",
                required.join(", ")
            ),
            Exclusion::GenericOverlap { generic, matched } => format!(
                "excluded: {generic} of {matched} matched criteria are generic terms"
            ),
            Exclusion::BelowInclusionThreshold { score, threshold } => format!(
                "excluded: score {score:.2} does not exceed inclusion threshold {threshold:.2}"
            ),
        }
    }
}

/// Map a final score and matched-criteria count to a discrete status.
pub fn classify(score: f64, matched: usize, config: &ScoringConfig) -> EligibilityStatus {
    let thresholds = &config.thresholds;
    if score >= thresholds.eligible && matched >= config.min_matched_for_eligible {
        EligibilityStatus::Eligible
    } else if score >= thresholds.partial && matched >= config.min_matched_for_partial {
        EligibilityStatus::PartiallyEligible
    } else {
        EligibilityStatus::NotEligible
    }
}

pub(crate) fn decide_inclusion(
    category: &Category,
    document: &DocumentText,
    matched_criteria: &[String],
    score: f64,
    config: &ScoringConfig,
) -> Option<Exclusion> {
    let required = category.required_terms();
    if !required.is_empty() && !required.iter().any(|term| document.contains_phrase(term)) {
        return Some(Exclusion::MissingRequiredTerms {
            required: required.to_vec(),
        });
    }

    let matched = matched_criteria.len();
    if matched > 0 && matched < GENERIC_MIN_MATCHED {
        let generic = matched_criteria
            .iter()
            .filter(|criterion| is_generic(criterion, &config.generic_terms))
            .count();
        if generic as f64 / matched as f64 > GENERIC_SHARE_LIMIT {
            return Some(Exclusion::GenericOverlap { generic, matched });
        }
    }

    if score <= config.inclusion_threshold {
        return Some(Exclusion::BelowInclusionThreshold {
            score,
            threshold: config.inclusion_threshold,
        });
    }

    None
}

fn is_generic(criterion: &str, generic_terms: &[String]) -> bool {
    let lowered = criterion.to_lowercase();
    generic_terms
        .iter()
        .any(|term| lowered.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::CategoryType;

    fn matched(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn classification_needs_score_and_matches() {
        let config = ScoringConfig::default();
        assert_eq!(classify(85.0, 2, &config), EligibilityStatus::Eligible);
        assert_eq!(classify(85.0, 1, &config), EligibilityStatus::PartiallyEligible);
        assert_eq!(classify(60.0, 1, &config), EligibilityStatus::PartiallyEligible);
        assert_eq!(classify(60.0, 0, &config), EligibilityStatus::NotEligible);
        assert_eq!(classify(59.99, 4, &config), EligibilityStatus::NotEligible);
    }

    #[test]
    fn missing_required_terms_exclude_category() {
        let category = Category::with_keywords("Sustainability Award", CategoryType::Special, ["collaboration"])
            .require_any_of(["climate", "renewable"]);
        let document = DocumentText::new("International collaboration week.", 100);

        let exclusion = decide_inclusion(
            &category,
            &document,
            &matched(&["collaboration"]),
            90.0,
            &ScoringConfig::default(),
        );
        assert!(matches!(exclusion, Some(Exclusion::MissingRequiredTerms { .. })));
        assert_eq!(
            exclusion.map(|reason| reason.summary()).as_deref(),
            Some("excluded: none of the required terms present (climate, renewable)")
        );
    }

    #[test]
    fn mostly_generic_matches_are_excluded_only_when_few() {
        let category = Category::with_keywords("Award", CategoryType::Institutional, ["x"]);
        let document = DocumentText::new("irrelevant", 100);
        let config = ScoringConfig::default();

        let few = decide_inclusion(
            &category,
            &document,
            &matched(&["international program", "regional initiative"]),
            70.0,
            &config,
        );
        assert_eq!(few, Some(Exclusion::GenericOverlap { generic: 2, matched: 2 }));

        let many = decide_inclusion(
            &category,
            &document,
            &matched(&["international program", "regional initiative", "global partnership"]),
            70.0,
            &config,
        );
        assert_eq!(many, None);
    }

    #[test]
    fn inclusion_threshold_is_strict() {
        let category = Category::with_keywords("Award", CategoryType::Institutional, ["x"]);
        let document = DocumentText::new("irrelevant", 100);
        let config = ScoringConfig::default();

        assert!(matches!(
            decide_inclusion(&category, &document, &[], 25.0, &config),
            Some(Exclusion::BelowInclusionThreshold { .. })
        ));
        assert_eq!(decide_inclusion(&category, &document, &[], 25.01, &config), None);
    }
}
