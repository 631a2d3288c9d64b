use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EligibilityStatus, MatchResult};
use super::report::AnalysisSummary;

/// Identifier assigned to a stored analysis.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied description of the analyzed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Repository record holding the ranked results of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: AnalysisId,
    pub metadata: DocumentMetadata,
    pub results: Vec<MatchResult>,
    pub summary: AnalysisSummary,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn top_result(&self) -> Option<&MatchResult> {
        self.results.first()
    }

    pub fn eligible_categories(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|result| result.status == EligibilityStatus::Eligible)
            .map(|result| result.category.as_str())
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError>;
    /// Most recent analyses first.
    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
