//! HTTP API for the journal
//!
//! Endpoints:
//! - GET  /health         - Health check
//! - POST /api/reflect    - Submit an entry (crisis triage, reflection, store)
//! - POST /api/analyze    - Classify only, nothing stored
//! - POST /api/similar    - Stored entries closest to a text
//! - POST /api/search     - Filter and sort stored entries
//! - GET  /api/analytics  - Metrics, time series, recent entries
//! - GET  /api/insights   - Pattern summary
//! - GET  /api/dashboard  - Landing numbers
//! - GET  /api/trends     - Weekly sentiment

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::journal::Journal;
use crate::error::JournalError;
use crate::types::{
    AnalysisOutput, AnalyticsView, Dashboard, PatternSummary, SearchQuery, SearchResult,
    SimilarEntry, Submission, WeeklyTrend,
};

/// App state
pub struct AppState {
    pub journal: Journal,
}

/// Body of the entry endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntryRequest {
    pub entry: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimilarRequest {
    pub entry: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
pub struct ReflectResponse {
    pub crisis: bool,
    #[serde(flatten)]
    pub submission: Submission,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub similar: Vec<SimilarEntry>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub weeks: Vec<WeeklyTrend>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON error with a status derived from the journal error
pub struct ApiError(JournalError);

impl From<JournalError> for ApiError {
    fn from(e: JournalError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            JournalError::EmptyEntry => StatusCode::BAD_REQUEST,
            JournalError::Generation(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Create router over a journal
pub fn create_router(journal: Journal) -> Router {
    let state = Arc::new(AppState { journal });

    Router::new()
        .route("/health", get(health))
        .route("/api/reflect", post(reflect))
        .route("/api/analyze", post(analyze))
        .route("/api/similar", post(similar))
        .route("/api/search", post(search))
        .route("/api/analytics", get(analytics))
        .route("/api/insights", get(insights))
        .route("/api/dashboard", get(dashboard))
        .route("/api/trends", get(trends))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        entries: state.journal.count().await?,
    }))
}

/// Submit an entry. Crisis is a normal 200 with `crisis: true`; a failed
/// reflection is a 502 that still carries the classification.
async fn reflect(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EntryRequest>,
) -> ApiResult<(StatusCode, Json<ReflectResponse>)> {
    let submission = state.journal.submit(&req.entry).await?;
    let status = match submission {
        Submission::ReflectionUnavailable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    Ok((
        status,
        Json(ReflectResponse {
            crisis: submission.is_crisis(),
            submission,
        }),
    ))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EntryRequest>,
) -> ApiResult<Json<AnalysisOutput>> {
    if req.entry.trim().is_empty() {
        return Err(JournalError::EmptyEntry.into());
    }
    Ok(Json(state.journal.analyze(&req.entry)))
}

async fn similar(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimilarRequest>,
) -> ApiResult<Json<SimilarResponse>> {
    if req.entry.trim().is_empty() {
        return Err(JournalError::EmptyEntry.into());
    }
    let top_n = req
        .top_n
        .unwrap_or(state.journal.config().analysis.similar_count);
    Ok(Json(SimilarResponse {
        similar: state.journal.similar(&req.entry, top_n).await?,
    }))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(query): Json<SearchQuery>,
) -> ApiResult<Json<SearchResult>> {
    Ok(Json(state.journal.search(&query).await?))
}

async fn analytics(State(state): State<Arc<AppState>>) -> ApiResult<Json<AnalyticsView>> {
    Ok(Json(state.journal.analytics().await?))
}

async fn insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<PatternSummary>> {
    Ok(Json(state.journal.insights().await?))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.journal.dashboard().await?))
}

async fn trends(State(state): State<Arc<AppState>>) -> ApiResult<Json<TrendsResponse>> {
    Ok(Json(TrendsResponse {
        weeks: state.journal.trends().await?,
    }))
}

/// Run the API server
pub async fn run_server(addr: &str, journal: Journal) -> crate::error::Result<()> {
    let router = create_router(journal);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "journal API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
