mod config;
mod policy;
mod rules;

pub use config::{
    ScoringConfig, ThresholdConfig, TypeWeights, DEFAULT_ELIGIBLE_THRESHOLD,
    DEFAULT_INCLUSION_THRESHOLD, DEFAULT_MAX_DISAMBIGUATION_BONUS, DEFAULT_MAX_TOKENS,
    DEFAULT_PARTIAL_THRESHOLD,
};
pub use policy::{classify, Exclusion};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::document::DocumentText;
use super::domain::{
    Category, CategoryType, Checklist, ChecklistItem, EligibilityStatus, MatchResult,
    ScoreBreakdown,
};
use super::report::{rank, recommendation};
use super::synonyms::SynonymTable;
use policy::decide_inclusion;
use rules::round_score;

/// Stateless scorer holding an immutable configuration and synonym table.
///
/// Shared freely across threads; every call owns its token buffers and results.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: ScoringConfig,
    synonyms: SynonymTable,
}

impl EligibilityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config: config.sanitized(),
            synonyms: SynonymTable::default(),
        }
    }

    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn prepare(&self, text: &str) -> DocumentText {
        DocumentText::new(text, self.config.max_tokens)
    }

    /// Score one category. Returns `None` for entries with neither criteria nor keywords.
    pub fn evaluate(&self, document: &DocumentText, category: &Category) -> Option<CategoryEvaluation> {
        let Some(shape) = category.shape() else {
            warn!(category = %category.name, "skipping category without criteria or keywords");
            return None;
        };

        let (components, signals) =
            rules::score_category(category, shape, document, &self.config, &self.synonyms);

        let matched_criteria: Vec<String> = components
            .iter()
            .filter(|component| component.met)
            .map(|component| component.criterion.clone())
            .collect();

        let score = signals.final_score;
        let status = classify(score, matched_criteria.len(), &self.config);
        let exclusion = decide_inclusion(category, document, &matched_criteria, score, &self.config);

        debug!(
            category = %category.name,
            score,
            matched = matched_criteria.len(),
            status = status.label(),
            outcome = %exclusion
                .as_ref()
                .map_or_else(|| "included".to_string(), Exclusion::summary),
            "evaluated category"
        );

        Some(CategoryEvaluation {
            category: category.name.clone(),
            category_type: category.category_type,
            score,
            status,
            components,
            breakdown: ScoreBreakdown {
                criteria_score: signals.criteria_score,
                similarity: round_score(signals.similarity * 100.0) / 100.0,
                type_weight: signals.type_weight,
                disambiguation_bonus: signals.disambiguation_bonus,
            },
            exclusion,
        })
    }

    /// Score every category against `text` and return the included ones, best first.
    pub fn analyze(&self, text: &str, categories: &[Category]) -> Vec<MatchResult> {
        let document = self.prepare(text);
        if document.is_blank() {
            debug!("blank document; no category can clear the inclusion threshold");
        }

        let evaluations: Vec<CategoryEvaluation> = categories
            .iter()
            .filter_map(|category| self.evaluate(&document, category))
            .collect();
        let evaluated = evaluations.len();

        let results = rank(
            evaluations
                .into_iter()
                .filter(CategoryEvaluation::is_included)
                .map(|evaluation| evaluation.into_result(&self.config))
                .collect(),
        );

        info!(
            categories = categories.len(),
            evaluated,
            included = results.len(),
            top = results.first().map(|result| result.category.as_str()).unwrap_or("none"),
            "document analyzed"
        );

        results
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// How a single criterion was evidenced in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    Literal,
    WordCoverage { fraction: f64 },
    Synonym { synonym: String },
    Unmatched,
}

/// Discrete contribution to a category score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: String,
    pub evidence: Evidence,
    pub credit: f64,
    pub possible: f64,
    pub met: bool,
}

/// Full evaluation of one category, including categories later excluded from results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEvaluation {
    pub category: String,
    pub category_type: CategoryType,
    pub score: f64,
    pub status: EligibilityStatus,
    pub components: Vec<ScoreComponent>,
    pub breakdown: ScoreBreakdown,
    pub exclusion: Option<Exclusion>,
}

impl CategoryEvaluation {
    pub fn is_included(&self) -> bool {
        self.exclusion.is_none()
    }

    pub fn matched_criteria(&self) -> Vec<String> {
        self.components
            .iter()
            .filter(|component| component.met)
            .map(|component| component.criterion.clone())
            .collect()
    }

    pub fn checklist(&self) -> Checklist {
        let criteria: Vec<ChecklistItem> = self
            .components
            .iter()
            .map(|component| ChecklistItem {
                text: component.criterion.clone(),
                met: component.met,
            })
            .collect();
        let criteria_met = criteria.iter().filter(|item| item.met).count();
        let total_criteria = criteria.len();
        let percentage_met = if total_criteria == 0 {
            0.0
        } else {
            round_score(criteria_met as f64 / total_criteria as f64 * 100.0)
        };

        Checklist {
            criteria,
            criteria_met,
            total_criteria,
            percentage_met,
            eligibility: self.status,
        }
    }

    pub fn into_result(self, config: &ScoringConfig) -> MatchResult {
        let checklist = self.checklist();
        let matched_criteria = self.matched_criteria();
        let unmet: Vec<&str> = checklist
            .criteria
            .iter()
            .filter(|item| !item.met)
            .map(|item| item.text.as_str())
            .collect();
        let recommendation = recommendation(&self.category, self.score, &matched_criteria, &unmet, config);

        MatchResult {
            category: self.category,
            category_type: self.category_type,
            score: self.score,
            status: self.status,
            matched_criteria,
            checklist,
            recommendation,
            breakdown: self.breakdown,
        }
    }
}
