use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DOMAIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("asean", &["southeast asian", "regional integration"]),
    ("awareness", &["advocacy", "information campaign", "orientation"]),
    ("capacity building", &["training", "skills development", "professional development"]),
    ("citizenship", &["civic responsibility", "global awareness", "social responsibility"]),
    ("collaboration", &["partnership", "cooperation", "teamwork", "alliance"]),
    ("community", &["outreach", "civic", "grassroots", "local engagement"]),
    ("education", &["learning", "teaching", "instruction", "academic"]),
    ("exchange", &["mobility", "study abroad", "visiting scholar"]),
    ("impact", &["outcome", "measurable result", "contribution"]),
    ("inclusive", &["inclusion", "diversity", "equity", "accessibility"]),
    ("innovation", &["creativity", "novel approach", "pioneering", "modernization"]),
    ("intercultural", &["multicultural", "cross-cultural", "cultural exchange"]),
    ("international", &["global", "cross-border", "transnational", "overseas"]),
    ("leadership", &["management", "guidance", "mentorship", "stewardship", "direction"]),
    ("mentorship", &["coaching", "advising", "tutoring"]),
    ("partnership", &["linkage", "memorandum of understanding", "consortium", "agreement"]),
    ("research", &["scholarship", "inquiry", "investigation"]),
    ("strategic", &["long-term plan", "institutional vision", "roadmap"]),
    ("sustainability", &["environmental", "green initiative", "conservation", "eco-friendly"]),
];

/// Immutable mapping from domain terms to paraphrases that count as weaker evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

/// Keywords plus the synonyms they pulled in, kept apart so synonym hits can be discounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedKeywords {
    pub literal: Vec<String>,
    pub synonyms: Vec<String>,
}

impl ExpandedKeywords {
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.literal
            .iter()
            .chain(self.synonyms.iter())
            .map(String::as_str)
    }
}

impl SynonymTable {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, values)| {
                let values = values.into_iter().map(|value| value.to_lowercase()).collect();
                (key.to_lowercase(), values)
            })
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn domain_defaults() -> Self {
        let entries = DOMAIN_SYNONYMS
            .iter()
            .map(|(key, values)| {
                (
                    key.to_string(),
                    values.iter().map(|value| value.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synonyms of every table key that is a substring of `keyword`, or contains it.
    pub fn synonyms_for(&self, keyword: &str) -> Vec<&str> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<&str> = Vec::new();
        for (key, values) in &self.entries {
            if keyword.contains(key.as_str()) || key.contains(keyword.as_str()) {
                for value in values {
                    if value != &keyword && !found.contains(&value.as_str()) {
                        found.push(value);
                    }
                }
            }
        }
        found
    }

    /// Each keyword verbatim, followed by the synonyms of any related table entry.
    pub fn expand<S: AsRef<str>>(&self, keywords: &[S]) -> ExpandedKeywords {
        let mut expanded = ExpandedKeywords::default();

        for keyword in keywords {
            let literal = keyword.as_ref().trim().to_lowercase();
            if literal.is_empty() || expanded.literal.contains(&literal) {
                continue;
            }
            expanded.literal.push(literal);
        }

        for keyword in keywords {
            for synonym in self.synonyms_for(keyword.as_ref()) {
                let owned = synonym.to_string();
                if !expanded.literal.contains(&owned) && !expanded.synonyms.contains(&owned) {
                    expanded.synonyms.push(owned);
                }
            }
        }

        expanded
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::domain_defaults()
    }
}
