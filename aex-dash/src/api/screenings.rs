//! Screening view API
//!
//! Each request triggers one pipeline run and returns the reconciled,
//! filtered, ordered list plus facet metadata, with per-row display
//! semantics (score bands, outcome class) for the presentation layer.

use std::sync::atomic::Ordering;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use aex_screen::{
    Facets, Filters, OutcomeClass, RunConfig, ScoreBand, ScreeningRecord, ScreeningView,
    SortDirection,
};

use crate::AppState;

/// Query parameters for the screening view
#[derive(Debug, Default, Deserialize)]
pub struct ScreeningQuery {
    /// Admit waiting applications (Tracker-backed and standalone)
    #[serde(default)]
    pub include_waiting: bool,

    /// Categorical equality filters
    pub call_status: Option<String>,
    pub role_code: Option<String>,
    pub outcome: Option<String>,

    /// Final-score range bounds, each side optional within [0, 100]
    pub score_min: Option<f64>,
    pub score_max: Option<f64>,

    /// Sort direction: "new" (default) or "old"
    #[serde(default)]
    pub sort: SortDirection,

    /// Clear all filters and reset the sort, keeping include_waiting
    #[serde(default)]
    pub reset: bool,
}

impl ScreeningQuery {
    fn into_run_config(self) -> RunConfig {
        let config = RunConfig {
            include_waiting: self.include_waiting,
            filters: Filters {
                call_status: self.call_status,
                role_code: self.role_code,
                outcome: self.outcome,
                score_min: self.score_min,
                score_max: self.score_max,
            },
            sort: self.sort,
        };
        if self.reset {
            config.reset_filters()
        } else {
            config
        }
    }
}

/// One canonical record plus its display semantics
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRow {
    #[serde(flatten)]
    pub record: ScreeningRecord,
    pub call_score_band: ScoreBand,
    pub similarity_score_band: ScoreBand,
    pub final_score_band: ScoreBand,
    pub outcome_class: OutcomeClass,
}

impl From<ScreeningRecord> for ScreeningRow {
    fn from(record: ScreeningRecord) -> Self {
        Self {
            call_score_band: ScoreBand::from_display(record.call_score.as_deref()),
            similarity_score_band: ScoreBand::from_display(record.similarity_score.as_deref()),
            final_score_band: ScoreBand::from_display(record.final_score.as_deref()),
            outcome_class: OutcomeClass::classify(record.screening_outcome.as_deref()),
            record,
        }
    }
}

/// Screening view response
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningResponse {
    pub records: Vec<ScreeningRow>,
    pub total: usize,
    pub facets: Facets,
}

impl From<ScreeningView> for ScreeningResponse {
    fn from(view: ScreeningView) -> Self {
        Self {
            records: view.records.into_iter().map(ScreeningRow::from).collect(),
            total: view.total,
            facets: view.facets,
        }
    }
}

/// GET /api/screenings
///
/// Runs the reconciliation pipeline with the requested configuration and
/// publishes the result under the latest-run-wins guard. A fatal run
/// returns a single descriptive error and leaves the previously published
/// view unchanged.
pub async fn get_screenings(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
) -> Result<Json<ScreeningResponse>, ScreeningError> {
    let config = query.into_run_config();
    let seq = state.run_seq.fetch_add(1, Ordering::SeqCst) + 1;

    match state.pipeline.run(&config).await {
        Ok(view) => {
            let response = ScreeningResponse::from(view);
            let mut latest = state.latest.write().await;
            // Publish only if this run is still the newest to finish
            if seq > latest.seq {
                latest.seq = seq;
                latest.view = Some(response.clone());
            }
            Ok(Json(response))
        }
        Err(err) => {
            error!(error = %err, "screening pipeline run failed");
            Err(ScreeningError::PipelineFailed(err.to_string()))
        }
    }
}

/// GET /api/screenings/latest
///
/// Returns the last successfully published view without triggering a new
/// pipeline run.
pub async fn get_latest_screenings(
    State(state): State<AppState>,
) -> Result<Json<ScreeningResponse>, ScreeningError> {
    let latest = state.latest.read().await;
    latest
        .view
        .clone()
        .map(Json)
        .ok_or(ScreeningError::NoPublishedView)
}

/// Screening API errors
#[derive(Debug)]
pub enum ScreeningError {
    PipelineFailed(String),
    NoPublishedView,
}

impl IntoResponse for ScreeningError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ScreeningError::PipelineFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            ScreeningError::NoPublishedView => (
                StatusCode::NOT_FOUND,
                "No screening view published yet".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
