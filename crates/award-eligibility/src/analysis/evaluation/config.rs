use serde::{Deserialize, Serialize};

use super::super::domain::CategoryType;

pub const DEFAULT_ELIGIBLE_THRESHOLD: f64 = 80.0;
pub const DEFAULT_PARTIAL_THRESHOLD: f64 = 60.0;
pub const DEFAULT_INCLUSION_THRESHOLD: f64 = 25.0;
pub const DEFAULT_MAX_DISAMBIGUATION_BONUS: f64 = 15.0;
pub const DEFAULT_MAX_TOKENS: usize = 5_000;

const DEFAULT_GENERIC_TERMS: &[&str] = &[
    "program",
    "initiative",
    "development",
    "collaboration",
    "partnership",
    "international",
    "regional",
    "global",
];

/// Percentage cutoffs applied to the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub eligible: f64,
    pub partial: f64,
}

impl ThresholdConfig {
    pub fn new(eligible: f64, partial: f64) -> Self {
        Self { eligible, partial }.sanitized()
    }

    /// Replace out-of-range values with defaults; an inverted pair resets both.
    pub fn sanitized(self) -> Self {
        let eligible = percentage_or(self.eligible, DEFAULT_ELIGIBLE_THRESHOLD);
        let partial = percentage_or(self.partial, DEFAULT_PARTIAL_THRESHOLD);

        if partial > eligible {
            return Self::default();
        }

        Self { eligible, partial }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            eligible: DEFAULT_ELIGIBLE_THRESHOLD,
            partial: DEFAULT_PARTIAL_THRESHOLD,
        }
    }
}

/// Multipliers applied per category type before the disambiguation bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeWeights {
    pub individual: f64,
    pub institutional: f64,
    pub special: f64,
    pub other: f64,
}

impl TypeWeights {
    pub fn weight_for(&self, category_type: CategoryType) -> f64 {
        match category_type {
            CategoryType::Individual => self.individual,
            CategoryType::Institutional => self.institutional,
            CategoryType::Special => self.special,
            CategoryType::Other => self.other,
        }
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            individual: positive_or(self.individual, defaults.individual),
            institutional: positive_or(self.institutional, defaults.institutional),
            special: positive_or(self.special, defaults.special),
            other: positive_or(self.other, defaults.other),
        }
    }
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            individual: 0.9,
            institutional: 1.0,
            special: 0.8,
            other: 1.0,
        }
    }
}

/// Engine configuration. Every field has a documented default, and invalid values are
/// repaired by [`ScoringConfig::sanitized`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: ThresholdConfig,
    pub inclusion_threshold: f64,
    pub min_matched_for_eligible: usize,
    pub min_matched_for_partial: usize,
    pub type_weights: TypeWeights,
    pub max_disambiguation_bonus: f64,
    pub generic_terms: Vec<String>,
    pub max_tokens: usize,
}

impl ScoringConfig {
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_inclusion_threshold(mut self, inclusion_threshold: f64) -> Self {
        self.inclusion_threshold = inclusion_threshold;
        self
    }

    pub fn sanitized(self) -> Self {
        let max_disambiguation_bonus =
            if self.max_disambiguation_bonus.is_finite() && self.max_disambiguation_bonus >= 0.0 {
                self.max_disambiguation_bonus
            } else {
                DEFAULT_MAX_DISAMBIGUATION_BONUS
            };

        let generic_terms = self
            .generic_terms
            .into_iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        Self {
            thresholds: self.thresholds.sanitized(),
            inclusion_threshold: percentage_or(self.inclusion_threshold, DEFAULT_INCLUSION_THRESHOLD),
            min_matched_for_eligible: self.min_matched_for_eligible,
            min_matched_for_partial: self.min_matched_for_partial,
            type_weights: self.type_weights.sanitized(),
            max_disambiguation_bonus,
            generic_terms,
            max_tokens: if self.max_tokens == 0 {
                DEFAULT_MAX_TOKENS
            } else {
                self.max_tokens
            },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            inclusion_threshold: DEFAULT_INCLUSION_THRESHOLD,
            min_matched_for_eligible: 2,
            min_matched_for_partial: 1,
            type_weights: TypeWeights::default(),
            max_disambiguation_bonus: DEFAULT_MAX_DISAMBIGUATION_BONUS,
            generic_terms: DEFAULT_GENERIC_TERMS
                .iter()
                .map(|term| term.to_string())
                .collect(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn percentage_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        value
    } else {
        fallback
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
