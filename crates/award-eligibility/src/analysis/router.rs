use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::extraction::ExtractionOutcome;
use super::repository::{AnalysisId, AnalysisRepository, DocumentMetadata, RepositoryError};
use super::service::{AnalysisServiceError, AwardAnalysisService};

const DEFAULT_RECENT_LIMIT: usize = 20;

/// Body accepted by the analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub metadata: DocumentMetadata,
    pub extraction: ExtractionOutcome,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentQuery {
    limit: Option<usize>,
}

/// Router builder exposing HTTP endpoints for document analysis.
pub fn analysis_router<R>(service: Arc<AwardAnalysisService<R>>) -> Router
where
    R: AnalysisRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/awards/analyses",
            post(analyze_handler::<R>).get(recent_handler::<R>),
        )
        .route(
            "/api/v1/awards/analyses/:analysis_id",
            get(fetch_handler::<R>),
        )
        .route("/api/v1/awards/categories", get(categories_handler::<R>))
        .route("/api/v1/awards/statistics", get(statistics_handler::<R>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<AwardAnalysisService<R>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.analyze(request.metadata, request.extraction) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(AnalysisServiceError::ExtractionFailed(reason)) => {
            let payload = json!({
                "error": "text extraction failed",
                "reason": reason,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AnalysisServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "analysis already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<AwardAnalysisService<R>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let id = AnalysisId(analysis_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AnalysisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "analysis not found",
                "analysis_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn recent_handler<R>(
    State(service): State<Arc<AwardAnalysisService<R>>>,
    Query(query): Query<RecentQuery>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    match service.recent(limit) {
        Ok(records) => (StatusCode::OK, axum::Json(json!({ "analyses": records }))).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<AwardAnalysisService<R>>>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let catalog = service.categories();
    let payload = json!({
        "count": catalog.len(),
        "categories": catalog.categories(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn statistics_handler<R>(
    State(service): State<Arc<AwardAnalysisService<R>>>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.statistics() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: AnalysisServiceError) -> Response {
    tracing::error!(error = %error, "analysis request failed");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
