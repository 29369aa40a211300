// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use clap::Parser;
use clipmark::{FileBackend, MarkerRepository};
use clipmark_node::browser;
use clipmark_node::config::NodeArgs;
use clipmark_node::server::{build_router, shared_repository};
use clipmark_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = NodeArgs::parse();
    init_telemetry();

    let mut cfg = args.into_config();

    // Resolve before changing directory so a relative --data-dir still works
    cfg.data_dir = std::fs::canonicalize(&cfg.data_dir)
        .with_context(|| format!("data directory {:?} is not accessible", cfg.data_dir))?;
    std::env::set_current_dir(&cfg.data_dir)
        .with_context(|| format!("cannot change directory to {:?}", cfg.data_dir))?;

    tracing::info!("Initializing clipmark with config: {:?}", cfg);

    let backend = FileBackend::new(cfg.marker_path());
    {
        // Startup summary only; a document that does not parse is still served as-is
        let probe = MarkerRepository::new(backend.clone(), cfg.save_mode);
        match probe.snapshot() {
            Ok(store) => tracing::info!(
                "Found {} markers across {} files in {:?}",
                store.marker_count(),
                store.file_count(),
                backend.path()
            ),
            Err(e) => tracing::warn!("Marker file {:?} is not a valid marker document: {}", backend.path(), e),
        }
    }

    let state = shared_repository(backend, cfg.save_mode);
    let app = build_router(state, &cfg);

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("cannot listen on {}", cfg.bind_addr))?;

    let url = cfg.local_url();
    println!("clipmark is running");
    println!("If no browser window opens, visit: {}", url);
    println!("Press Ctrl+C to stop");

    if cfg.open_browser {
        browser::spawn_launch(url, cfg.browser_delay);
    }

    tracing::info!("Listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
