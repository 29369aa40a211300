// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use clipmark::{MarkerBackend, MarkerRepository, SaveMode};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{HTML_CONTENT_TYPE, JSON_CONTENT_TYPE, SAVE_OK_BODY};
use crate::config::NodeConfig;
use crate::errors::ApiError;
use crate::page::INDEX_HTML;
use crate::telemetry;

/// The repository behind the handlers. The mutex serializes loads and saves
/// within this process so two saves never interleave on disk.
pub type SharedRepository = Arc<Mutex<MarkerRepository<Box<dyn MarkerBackend>>>>;

pub fn shared_repository(backend: impl MarkerBackend + 'static, mode: SaveMode) -> SharedRepository {
    let backend: Box<dyn MarkerBackend> = Box::new(backend);
    Arc::new(Mutex::new(MarkerRepository::new(backend, mode)))
}

pub fn build_router(state: SharedRepository, cfg: &NodeConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/load", get(load))
        .route("/save", post(save))
        // Observability
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if cfg.serve_static {
        tracing::debug!("Serving static files from {:?}", cfg.data_dir);
        app = app.fallback_service(ServeDir::new(&cfg.data_dir));
    }

    let body_limit = match cfg.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    app.layer(body_limit).layer(TraceLayer::new_for_http())
}

async fn index() -> Response {
    ([(CONTENT_TYPE, HTML_CONTENT_TYPE)], INDEX_HTML).into_response()
}

async fn load(State(state): State<SharedRepository>) -> Result<Response, ApiError> {
    let repo = state.lock().await;
    let doc = repo.load()?;
    telemetry::record_load();
    Ok(([(CONTENT_TYPE, JSON_CONTENT_TYPE)], doc).into_response())
}

async fn save(State(state): State<SharedRepository>, body: Bytes) -> Result<Response, ApiError> {
    let repo = state.lock().await;
    match repo.save(&body) {
        Ok(written) => {
            telemetry::record_save(written);
            tracing::info!("Saved {} bytes to {}", written, repo.backend().location());
            Ok((StatusCode::OK, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], SAVE_OK_BODY).into_response())
        }
        Err(e) => {
            telemetry::record_save_failure();
            Err(e.into())
        }
    }
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}
