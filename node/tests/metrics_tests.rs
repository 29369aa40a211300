// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Kept in its own test binary: the Prometheus recorder is process-global.
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use clipmark::{FileBackend, SaveMode};
use clipmark_node::config::NodeConfig;
use clipmark_node::server::{build_router, shared_repository};
use clipmark_node::telemetry::{init_metrics, LOADS_TOTAL, SAVES_TOTAL, SAVE_FAILURES_TOTAL, STORE_SIZE_BYTES};
use tempfile::tempdir;
use tower::ServiceExt; // for oneshot

fn router_for(cfg: &NodeConfig) -> Router {
    build_router(shared_repository(FileBackend::new(cfg.marker_path()), SaveMode::Verbatim), cfg)
}

async fn call(app: &Router, method: &str, uri: &str, body: &'static [u8]) -> (StatusCode, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

fn sample(rendered: &str, name: &str) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (metric, value) = line.split_once(' ')?;
            (metric == name).then(|| value.trim().parse().ok()).flatten()
        })
}

#[tokio::test]
async fn test_counters_follow_saves_and_loads() {
    init_metrics();

    let dir = tempdir().unwrap();
    let mut cfg = NodeConfig::default();
    cfg.data_dir = dir.path().to_path_buf();
    let app = router_for(&cfg);

    let mut broken = cfg.clone();
    broken.marker_file = "missing_dir/markers.json".into();
    let broken_app = router_for(&broken);

    assert_eq!(call(&app, "POST", "/save", b"{\"a.mp3\": []}").await.0, StatusCode::OK);
    assert_eq!(call(&app, "GET", "/load", b"").await.0, StatusCode::OK);
    assert_eq!(call(&app, "GET", "/load", b"").await.0, StatusCode::OK);
    assert_eq!(
        call(&broken_app, "POST", "/save", b"{}").await.0,
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let (status, rendered) = call(&app, "GET", "/metrics", b"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sample(&rendered, SAVES_TOTAL), Some(1.0), "{}", rendered);
    assert_eq!(sample(&rendered, LOADS_TOTAL), Some(2.0), "{}", rendered);
    assert_eq!(sample(&rendered, SAVE_FAILURES_TOTAL), Some(1.0), "{}", rendered);
    assert_eq!(sample(&rendered, STORE_SIZE_BYTES), Some(13.0), "{}", rendered);
}
