use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::analysis::catalog::CategoryCatalog;
use crate::analysis::domain::{Category, CategoryType};
use crate::analysis::evaluation::{EligibilityEngine, ScoringConfig};
use crate::analysis::repository::{
    AnalysisId, AnalysisRecord, AnalysisRepository, DocumentMetadata, RepositoryError,
};
use crate::analysis::{analysis_router, AwardAnalysisService};

pub(super) const GLOBAL_CITIZENSHIP_TEXT: &str = "The Global Citizenship program builds \
    intercultural understanding and community engagement. Students practice social \
    responsibility, celebrate diversity and inclusion, and align projects with the \
    sustainable development goals.";

pub(super) const GENERIC_TEXT: &str =
    "Our international program fosters collaboration across partner universities.";

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(scoring_config())
}

pub(super) fn icons_catalog() -> CategoryCatalog {
    CategoryCatalog::icons_awards().expect("bundled catalog parses")
}

pub(super) fn global_citizenship_keywords() -> Category {
    Category::with_keywords(
        "Global Citizenship Award",
        CategoryType::Individual,
        [
            "global citizenship",
            "intercultural understanding",
            "community engagement",
        ],
    )
}

pub(super) fn sustainability_category() -> Category {
    Category::with_keywords(
        "Sustainability Award",
        CategoryType::Special,
        [
            "international program",
            "collaboration",
            "environmental stewardship",
            "renewable energy",
        ],
    )
    .require_any_of([
        "environmental",
        "green",
        "carbon",
        "renewable",
        "climate",
        "ecological",
        "sustainability",
        "conservation",
        "energy",
        "biodiversity",
    ])
}

pub(super) fn metadata(title: &str) -> DocumentMetadata {
    DocumentMetadata {
        title: title.to_string(),
        description: Some("Submission for the ICONS awards".to_string()),
        file_name: Some(format!("{}.txt", title.to_lowercase().replace(' ', "-"))),
    }
}

pub(super) fn build_service() -> (AwardAnalysisService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AwardAnalysisService::new(repository.clone(), icons_catalog(), scoring_config());
    (service, repository)
}

pub(super) fn analysis_router_with_service(
    service: AwardAnalysisService<MemoryRepository>,
) -> axum::Router {
    analysis_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<AnalysisRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.analysis_id == record.analysis_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.analysis_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
