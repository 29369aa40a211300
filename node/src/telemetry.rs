// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const SAVES_TOTAL: &str = "clipmark_saves_total";
pub const SAVE_FAILURES_TOTAL: &str = "clipmark_save_failures_total";
pub const LOADS_TOTAL: &str = "clipmark_loads_total";
pub const STORE_SIZE_BYTES: &str = "clipmark_store_size_bytes";

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "clipmark_node=debug,clipmark=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    init_metrics();
}

/// Installs the Prometheus recorder behind `/metrics`. Only the first call in
/// a process takes effect.
pub fn init_metrics() {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::warn!("Metrics disabled: {}", e),
    }

    metrics::describe_counter!(SAVES_TOTAL, "Successful marker saves");
    metrics::describe_counter!(SAVE_FAILURES_TOTAL, "Marker saves that failed or were rejected");
    metrics::describe_counter!(LOADS_TOTAL, "Marker loads served");
    metrics::describe_gauge!(STORE_SIZE_BYTES, "Size of the last saved marker document in bytes");
}

pub fn record_save(bytes: usize) {
    metrics::increment_counter!(SAVES_TOTAL);
    metrics::gauge!(STORE_SIZE_BYTES, bytes as f64);
}

pub fn record_save_failure() {
    metrics::increment_counter!(SAVE_FAILURES_TOTAL);
}

pub fn record_load() {
    metrics::increment_counter!(LOADS_TOTAL);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
