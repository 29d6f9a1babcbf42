//! Work report engine HTTP server
//!
//! Serves billing-period work summaries over HTTP. The configuration
//! directory defaults to `./config/default` and can be overridden with
//! `WORK_REPORT_CONFIG_DIR`.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use work_report_engine::api::{AppState, create_router};
use work_report_engine::config::ConfigLoader;
use work_report_engine::store::{InMemoryReportStore, ReportStore};

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "work_report_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("WORK_REPORT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {config_dir}"))?;

    let store = match &config.config().server.data_file {
        Some(path) => InMemoryReportStore::from_json_file(path)
            .with_context(|| format!("seeding report store from {path}"))?,
        None => InMemoryReportStore::new(),
    };
    tracing::info!(
        reports = store.report_count()?,
        projects = store.list_projects()?.len(),
        "Report store ready"
    );

    let bind_address = config.config().server.bind_address.clone();
    let state = AppState::new(config, Arc::new(store));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    tracing::info!("Work report engine v{} listening on {}", env!("CARGO_PKG_VERSION"), bind_address);

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
