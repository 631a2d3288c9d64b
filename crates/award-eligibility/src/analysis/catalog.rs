use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::domain::{Category, CategoryType, Criterion};

const ICONS_AWARDS_JSON: &str = include_str!("../../data/icons_awards.json");
const LIST_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read category dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid category JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid category CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported category dataset format `{0}` (expected .json or .csv)")]
    UnsupportedFormat(String),
    #[error("category dataset contains no categories")]
    Empty,
}

/// Read-only category list an analysis is scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { categories })
    }

    /// The eight ICONS award categories bundled with the crate.
    pub fn icons_awards() -> Result<Self, CatalogError> {
        Self::from_json_str(ICONS_AWARDS_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_reader(reader)?;
        Self::new(categories)
    }

    /// CSV with a header row: `name,type,criteria,keywords,required_terms`.
    /// List columns separate entries with `;`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut categories = Vec::new();
        for row in csv_reader.deserialize::<CategoryRow>() {
            categories.push(row?.into_category());
        }

        Self::new(categories)
    }

    /// Dispatches on the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?),
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    name: String,
    #[serde(rename = "type")]
    category_type: String,
    #[serde(default, deserialize_with = "separated_list")]
    criteria: Vec<String>,
    #[serde(default, deserialize_with = "separated_list")]
    keywords: Vec<String>,
    #[serde(default, deserialize_with = "separated_list")]
    required_terms: Vec<String>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        let category_type = CategoryType::from_label(&self.category_type);
        let mut category = Category::with_keywords(self.name, category_type, self.keywords);
        category.criteria = self.criteria.into_iter().map(Criterion::new).collect();
        if self.required_terms.is_empty() {
            category
        } else {
            category.require_any_of(self.required_terms)
        }
    }
}

fn separated_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn bundled_catalog_lists_the_eight_awards() {
        let catalog = CategoryCatalog::icons_awards().expect("bundled catalog parses");
        assert_eq!(catalog.len(), 8);
        assert!(catalog.categories().iter().all(Category::is_well_formed));

        let sustainability = catalog.get("sustainability award").expect("present");
        assert_eq!(sustainability.category_type, CategoryType::Special);
        assert!(sustainability.required_terms().contains(&"renewable".to_string()));

        let emerging = catalog.get("Emerging Leadership Award").expect("present");
        assert_eq!(emerging.disambiguation_rules.get("student leader"), Some(&5.0));
    }

    #[test]
    fn json_accepts_plain_and_weighted_criteria() {
        let json = r#"[
            {
                "name": "Research Award",
                "type": "Institutional",
                "criteria": ["peer reviewed output", { "text": "research funding", "weight": 2.5 }],
                "relevance_rules": { "requiredTermsAnyOf": ["research"] }
            },
            { "category": "Open Award", "type": "Community", "keywords": ["openness"] }
        ]"#;
        let catalog = CategoryCatalog::from_json_str(json).expect("parses");

        let research = &catalog.categories()[0];
        assert_eq!(research.criteria[1], Criterion::weighted("research funding", 2.5));
        assert_eq!(research.required_terms(), ["research"]);

        let open = &catalog.categories()[1];
        assert_eq!(open.name, "Open Award");
        assert_eq!(open.category_type, CategoryType::Other);
    }

    #[test]
    fn blank_criteria_are_dropped_so_keywords_drive_the_checklist() {
        let json = r#"[{
            "name": "Climate Award",
            "type": "Special",
            "criteria": ["   ", ""],
            "keywords": ["climate action", "renewable energy"]
        }]"#;
        let catalog = CategoryCatalog::from_json_str(json).expect("parses");
        let climate = &catalog.categories()[0];
        assert!(climate.criteria.is_empty());

        let engine = crate::analysis::EligibilityEngine::default();
        let evaluation = engine
            .evaluate(&engine.prepare("Campus climate action and renewable energy."), climate)
            .expect("keywords make it well formed");
        let checklist = evaluation.checklist();
        assert_eq!(checklist.total_criteria, climate.keywords.len());
        assert_eq!(checklist.criteria_met, 2);
    }

    #[test]
    fn csv_rows_split_list_columns() {
        let csv = "name,type,criteria,keywords,required_terms\n\
                   Sustainability Award,Special,,renewable energy; climate action,climate;energy\n\
                   Mentoring Award,individual,peer mentoring;coaching circles,,\n";
        let catalog = CategoryCatalog::from_csv_reader(Cursor::new(csv)).expect("parses");

        let first = &catalog.categories()[0];
        assert!(first.criteria.is_empty());
        assert_eq!(first.keywords, ["renewable energy", "climate action"]);
        assert_eq!(first.required_terms(), ["climate", "energy"]);

        let second = &catalog.categories()[1];
        assert_eq!(second.category_type, CategoryType::Individual);
        assert_eq!(second.criteria.len(), 2);
        assert!(second.relevance_rules.is_none());
    }

    #[test]
    fn empty_and_unknown_datasets_are_rejected() {
        assert!(matches!(CategoryCatalog::from_json_str("[]"), Err(CatalogError::Empty)));
        assert!(matches!(
            CategoryCatalog::from_path("awards.yaml"),
            Err(CatalogError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }
}
