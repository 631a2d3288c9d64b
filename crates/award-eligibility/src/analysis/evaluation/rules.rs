use super::super::document::DocumentText;
use super::super::domain::{Category, CategoryShape};
use super::super::matcher::criterion_met;
use super::super::normalizer::normalize;
use super::super::similarity::{jaccard, keyword_tokens};
use super::super::synonyms::SynonymTable;
use super::config::ScoringConfig;
use super::{Evidence, ScoreComponent};

pub(crate) const LITERAL_CREDIT: f64 = 15.0;
pub(crate) const WORD_COVERAGE_CREDIT: f64 = 10.0;
pub(crate) const SYNONYM_CREDIT: f64 = 5.0;

const WORD_COVERAGE_RATIO: f64 = 0.7;

pub(crate) struct ScoreSignals {
    pub criteria_score: f64,
    pub similarity: f64,
    pub type_weight: f64,
    pub disambiguation_bonus: f64,
    pub final_score: f64,
}

pub(crate) fn score_category(
    category: &Category,
    shape: CategoryShape<'_>,
    document: &DocumentText,
    config: &ScoringConfig,
    synonyms: &SynonymTable,
) -> (Vec<ScoreComponent>, ScoreSignals) {
    let items: Vec<(&str, f64)> = match shape {
        CategoryShape::Checklist(criteria) => criteria
            .iter()
            .map(|criterion| (criterion.text.as_str(), criterion.effective_weight()))
            .collect(),
        CategoryShape::Keywords(keywords) => keywords
            .iter()
            .map(|keyword| (keyword.as_str(), 1.0))
            .collect(),
    };

    let mut components = Vec::with_capacity(items.len());
    let mut earned = 0.0;
    let mut possible = 0.0;

    for (text, weight) in items {
        let evidence = criterion_evidence(text, document, synonyms);
        let credit = evidence.credit() * weight;
        let available = LITERAL_CREDIT * weight;
        earned += credit;
        possible += available;

        components.push(ScoreComponent {
            criterion: text.to_string(),
            met: criterion_met(document, text),
            credit,
            possible: available,
            evidence,
        });
    }

    let criteria_score = if possible > 0.0 {
        (earned / possible * 100.0).min(100.0)
    } else {
        0.0
    };

    let similarity = match shape {
        CategoryShape::Checklist(criteria) => {
            let texts: Vec<&str> = criteria.iter().map(|criterion| criterion.text.as_str()).collect();
            jaccard(document.tokens(), &keyword_tokens(&texts))
        }
        CategoryShape::Keywords(keywords) => jaccard(document.tokens(), &keyword_tokens(keywords)),
    };

    let base = match shape {
        CategoryShape::Checklist(_) => criteria_score,
        CategoryShape::Keywords(_) => criteria_score.max(similarity * 100.0),
    };

    let type_weight = config.type_weights.weight_for(category.category_type);
    let disambiguation_bonus = disambiguation_bonus(category, document, config);
    let final_score = round_score((base * type_weight + disambiguation_bonus).clamp(0.0, 100.0));

    let signals = ScoreSignals {
        criteria_score: round_score(criteria_score),
        similarity,
        type_weight,
        disambiguation_bonus,
        final_score,
    };

    (components, signals)
}

/// Best available evidence for one criterion: literal text, word coverage, then synonyms.
fn criterion_evidence(text: &str, document: &DocumentText, synonyms: &SynonymTable) -> Evidence {
    if document.contains_phrase(text) {
        return Evidence::Literal;
    }

    let words = normalize(text);
    let wanted = words.unique();
    if !wanted.is_empty() {
        let present = wanted
            .iter()
            .filter(|word| document.contains_stem(word))
            .count();
        let fraction = present as f64 / wanted.len() as f64;
        if fraction >= WORD_COVERAGE_RATIO {
            return Evidence::WordCoverage { fraction };
        }
    }

    synonyms
        .expand(&[text])
        .synonyms
        .into_iter()
        .find(|synonym| synonym_present(synonym, document))
        .map_or(Evidence::Unmatched, |synonym| Evidence::Synonym { synonym })
}

fn synonym_present(synonym: &str, document: &DocumentText) -> bool {
    if document.contains_phrase(synonym) {
        return true;
    }
    let tokens = normalize(synonym);
    !tokens.is_empty()
        && tokens
            .tokens()
            .iter()
            .all(|token| document.contains_stem(token))
}

/// Sum of bonuses for context phrases present in the text, capped by configuration.
fn disambiguation_bonus(category: &Category, document: &DocumentText, config: &ScoringConfig) -> f64 {
    let total: f64 = category
        .disambiguation_rules
        .iter()
        .filter(|(_, bonus)| bonus.is_finite() && **bonus > 0.0)
        .filter(|(phrase, _)| document.contains_phrase(phrase))
        .map(|(_, bonus)| *bonus)
        .sum();

    total.min(config.max_disambiguation_bonus)
}

pub(crate) fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Evidence {
    pub fn credit(&self) -> f64 {
        match self {
            Evidence::Literal => LITERAL_CREDIT,
            Evidence::WordCoverage { fraction } => fraction * WORD_COVERAGE_CREDIT,
            Evidence::Synonym { .. } => SYNONYM_CREDIT,
            Evidence::Unmatched => 0.0,
        }
    }
}
