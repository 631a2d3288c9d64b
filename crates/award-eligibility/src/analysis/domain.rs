use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Recognition track a category belongs to; drives the type weight applied to its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    Individual,
    Institutional,
    Special,
    #[serde(other)]
    Other,
}

impl CategoryType {
    pub const fn label(self) -> &'static str {
        match self {
            CategoryType::Individual => "Individual",
            CategoryType::Institutional => "Institutional",
            CategoryType::Special => "Special",
            CategoryType::Other => "Other",
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "individual" => Self::Individual,
            "institutional" => Self::Institutional,
            "special" => Self::Special,
            _ => Self::Other,
        }
    }
}

/// A single required phrase within a category definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CriterionRepr")]
pub struct Criterion {
    pub text: String,
    pub weight: f64,
}

impl Criterion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: 1.0,
        }
    }

    pub fn weighted(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// Weight used during scoring. Non-finite or negative weights count as 1.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight >= 0.0 {
            self.weight
        } else {
            1.0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CriterionRepr {
    Text(String),
    Weighted {
        text: String,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

fn default_weight() -> f64 {
    1.0
}

impl From<CriterionRepr> for Criterion {
    fn from(value: CriterionRepr) -> Self {
        match value {
            CriterionRepr::Text(text) => Criterion::new(text),
            CriterionRepr::Weighted { text, weight } => Criterion::weighted(text, weight),
        }
    }
}

/// Filters that suppress a category unless the document carries domain vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelevanceRules {
    #[serde(default, alias = "requiredTermsAnyOf")]
    pub required_terms_any_of: Vec<String>,
}

/// Award or recognition category as supplied by the catalog.
///
/// A category declares either an explicit `criteria` checklist or a flat `keywords` list.
/// `disambiguation_rules` maps context phrases to the bonus they award when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "category")]
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(
        default,
        deserialize_with = "non_blank_criteria",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub disambiguation_rules: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_rules: Option<RelevanceRules>,
}

fn non_blank_criteria<'de, D>(deserializer: D) -> Result<Vec<Criterion>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut criteria = Vec::<Criterion>::deserialize(deserializer)?;
    criteria.retain(|criterion| !criterion.text.trim().is_empty());
    Ok(criteria)
}

/// Item list a category is scored against.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CategoryShape<'a> {
    Checklist(&'a [Criterion]),
    Keywords(&'a [String]),
}

impl Category {
    pub fn with_criteria<I, S>(name: impl Into<String>, category_type: CategoryType, criteria: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            category_type,
            criteria: criteria
                .into_iter()
                .map(Into::into)
                .filter(|text: &String| !text.trim().is_empty())
                .map(Criterion::new)
                .collect(),
            keywords: Vec::new(),
            disambiguation_rules: BTreeMap::new(),
            relevance_rules: None,
        }
    }

    pub fn with_keywords<I, S>(name: impl Into<String>, category_type: CategoryType, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            category_type,
            criteria: Vec::new(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            disambiguation_rules: BTreeMap::new(),
            relevance_rules: None,
        }
    }

    pub fn disambiguate(mut self, phrase: impl Into<String>, bonus: f64) -> Self {
        self.disambiguation_rules.insert(phrase.into(), bonus);
        self
    }

    pub fn require_any_of<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relevance_rules = Some(RelevanceRules {
            required_terms_any_of: terms.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Criteria take precedence over keywords; `None` marks a malformed entry.
    ///
    /// Blank criteria are dropped when a category is built or deserialized, so a checklist
    /// covers every entry of `criteria` and a category with only blank criteria falls back
    /// to its keywords.
    pub(crate) fn shape(&self) -> Option<CategoryShape<'_>> {
        let has_text = |value: &str| !value.trim().is_empty();
        if self.criteria.iter().any(|criterion| has_text(&criterion.text)) {
            Some(CategoryShape::Checklist(&self.criteria))
        } else if self.keywords.iter().any(|keyword| has_text(keyword)) {
            Some(CategoryShape::Keywords(&self.keywords))
        } else {
            None
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.shape().is_some()
    }

    pub fn required_terms(&self) -> &[String] {
        self.relevance_rules
            .as_ref()
            .map(|rules| rules.required_terms_any_of.as_slice())
            .unwrap_or(&[])
    }
}

/// Discrete eligibility outcome for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityStatus {
    Eligible,
    #[serde(rename = "Partially Eligible")]
    PartiallyEligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::PartiallyEligible => "Partially Eligible",
            EligibilityStatus::NotEligible => "Not Eligible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub met: bool,
}

/// Per-criterion met/unmet view of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub criteria: Vec<ChecklistItem>,
    pub criteria_met: usize,
    pub total_criteria: usize,
    pub percentage_met: f64,
    pub eligibility: EligibilityStatus,
}

/// How the final score was assembled, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub criteria_score: f64,
    pub similarity: f64,
    pub type_weight: f64,
    pub disambiguation_bonus: f64,
}

/// Ranked, explainable eligibility result for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub category: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub score: f64,
    pub status: EligibilityStatus,
    pub matched_criteria: Vec<String>,
    pub checklist: Checklist,
    pub recommendation: String,
    pub breakdown: ScoreBreakdown,
}
