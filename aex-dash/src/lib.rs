//! aex-dash library - Screening Dashboard service
//!
//! Exposes the screening reconciliation pipeline as a JSON HTTP API. Each
//! request triggers one pipeline run over fresh store snapshots; finished
//! views are published into shared state under a latest-run-wins guard so
//! an overlapping stale run can never overwrite a newer result.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use aex_screen::{CollectionNames, RecordStore, ScreeningPipeline};

use crate::api::screenings::ScreeningResponse;

pub mod api;
pub mod rest;

/// Last published view, guarded by its run sequence number.
///
/// A run may only publish here if its sequence is still the newest; a run
/// that fails publishes nothing, leaving the previous view untouched.
#[derive(Debug, Default)]
pub struct Published {
    pub seq: u64,
    pub view: Option<ScreeningResponse>,
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The reconciliation pipeline over the record store
    pub pipeline: Arc<ScreeningPipeline<Arc<dyn RecordStore>>>,
    /// Latest published view (latest-run-wins)
    pub latest: Arc<RwLock<Published>>,
    /// Monotonic run sequence counter
    pub run_seq: Arc<AtomicU64>,
}

impl AppState {
    /// Create new application state over a record store
    pub fn new(store: Arc<dyn RecordStore>, names: CollectionNames) -> Self {
        Self {
            pipeline: Arc::new(ScreeningPipeline::with_names(store, names)),
            latest: Arc::new(RwLock::new(Published::default())),
            run_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/screenings", get(api::get_screenings))
        .route("/api/screenings/latest", get(api::get_latest_screenings))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
