//! Award eligibility analysis: text normalization, fuzzy criteria matching, scoring and
//! ranking of award categories against an extracted document.
//!
//! The engine is pure and synchronous. [`AwardAnalysisService`] wires it to a category
//! catalog and an [`AnalysisRepository`], and [`analysis_router`] exposes the service over HTTP.

pub mod catalog;
pub mod document;
pub mod domain;
pub mod evaluation;
pub mod extraction;
pub mod matcher;
pub mod normalizer;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod similarity;
pub mod statistics;
pub mod synonyms;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CategoryCatalog};
pub use document::DocumentText;
pub use domain::{
    Category, CategoryType, Checklist, ChecklistItem, Criterion, EligibilityStatus, MatchResult,
    RelevanceRules, ScoreBreakdown,
};
pub use evaluation::{
    classify, CategoryEvaluation, EligibilityEngine, Evidence, Exclusion, ScoreComponent,
    ScoringConfig, ThresholdConfig, TypeWeights,
};
pub use extraction::{ExtractionOutcome, PlainTextExtractor, TextExtractor};
pub use matcher::{criterion_met, phrase_met};
pub use normalizer::{normalize, TokenSet};
pub use report::{rank, AnalysisSummary};
pub use repository::{
    AnalysisId, AnalysisRecord, AnalysisRepository, DocumentMetadata, RepositoryError,
};
pub use router::{analysis_router, AnalysisRequest};
pub use service::{AnalysisServiceError, AwardAnalysisService};
pub use similarity::{is_partial_match, jaccard, keyword_tokens};
pub use statistics::{AwardStatistics, StatisticsReport, StatusDistribution};
pub use synonyms::{ExpandedKeywords, SynonymTable};
