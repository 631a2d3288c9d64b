use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::catalog::CategoryCatalog;
use super::evaluation::{EligibilityEngine, ScoringConfig};
use super::extraction::ExtractionOutcome;
use super::report::AnalysisSummary;
use super::statistics::StatisticsReport;
use super::repository::{
    AnalysisId, AnalysisRecord, AnalysisRepository, DocumentMetadata, RepositoryError,
};

/// Service composing the scoring engine, category catalog, and repository.
pub struct AwardAnalysisService<R> {
    engine: Arc<EligibilityEngine>,
    catalog: Arc<CategoryCatalog>,
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> AwardAnalysisService<R>
where
    R: AnalysisRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: CategoryCatalog, config: ScoringConfig) -> Self {
        Self::with_engine(repository, catalog, EligibilityEngine::new(config))
    }

    pub fn with_engine(repository: Arc<R>, catalog: CategoryCatalog, engine: EligibilityEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            catalog: Arc::new(catalog),
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_analysis_id(&self) -> AnalysisId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        AnalysisId(format!("analysis-{id:06}"))
    }

    /// Score an extraction outcome and persist the ranked results.
    pub fn analyze(
        &self,
        metadata: DocumentMetadata,
        extraction: ExtractionOutcome,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        match extraction {
            ExtractionOutcome::Extracted { text } => self.analyze_text(metadata, &text),
            ExtractionOutcome::Failed { reason } => {
                warn!(title = %metadata.title, %reason, "extraction failed upstream");
                Err(AnalysisServiceError::ExtractionFailed(reason))
            }
        }
    }

    pub fn analyze_text(
        &self,
        metadata: DocumentMetadata,
        text: &str,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        let results = self.engine.analyze(text, self.catalog.categories());
        let summary = AnalysisSummary::from_results(&results);

        let record = AnalysisRecord {
            analysis_id: self.next_analysis_id(),
            metadata,
            results,
            summary,
            analyzed_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            analysis_id = %stored.analysis_id,
            results = stored.results.len(),
            "analysis stored"
        );
        Ok(stored)
    }

    pub fn get(&self, analysis_id: &AnalysisId) -> Result<AnalysisRecord, AnalysisServiceError> {
        let record = self
            .repository
            .fetch(analysis_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, AnalysisServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    /// Per-award progress across every stored analysis.
    pub fn statistics(&self) -> Result<StatisticsReport, AnalysisServiceError> {
        let records = self.repository.recent(usize::MAX)?;
        Ok(StatisticsReport::from_records(&self.catalog, &records))
    }

    pub fn categories(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
