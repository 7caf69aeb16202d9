mod cli;
mod telemetry;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use axum::http::HeaderValue;
use bookmark_core::{seed_if_empty, Repository};
use bookmark_gateway::{App, AppState, CorsPolicy};
use bookmark_service::BookmarkService;
use bookmark_storage::{InMemoryRepository, SqliteRepository};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        seed = config.seed,
        "starting bookmark gateway"
    );

    let state = match config.storage {
        StorageBackendArg::InMemory => build_state(InMemoryRepository::new(), config.seed).await?,
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&config.sqlite_url)
                .await
                .with_context(|| format!("cannot open sqlite database {}", config.sqlite_url))?;
            repository
                .migrate()
                .await
                .context("cannot create bookmarks schema")?;
            build_state(repository, config.seed).await?
        }
    };

    let cors = cors_policy(&config.cors_origins)?;
    let app = App::router(state, cors);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn build_state<R: Repository>(repository: R, seed: bool) -> anyhow::Result<AppState> {
    if seed {
        seed_if_empty(&repository)
            .await
            .context("cannot seed sample bookmarks")?;
    }

    Ok(AppState::new(Arc::new(BookmarkService::new(repository))))
}

fn cors_policy(origins: &[String]) -> anyhow::Result<CorsPolicy> {
    let origins = origins
        .iter()
        .filter(|origin| !origin.trim().is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsPolicy::from_origins(origins))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
