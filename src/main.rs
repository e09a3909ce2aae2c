mod api_doc;
mod config;
mod document;
mod error;
mod handlers;
mod models;
mod router;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::Config;
use state::AppState;
use store::{JsonFileStore, MemoryStore};
use tracing_subscriber::EnvFilter;

const BANNER: &str = r"
▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄
█ MinionDoc API Server Started! █
█      Now serving requests      █
▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("miniondoc starting");

    let config = Config::from_env()?;
    config.log_startup();

    let state = if config.in_memory() {
        tracing::warn!("Using in-memory document, nothing will be persisted");
        AppState::new(MemoryStore::default())
    } else {
        let store = JsonFileStore::new(&config.data_file);
        store.ensure_exists().await?;
        tracing::info!("Data file: {}", store.path().display());
        AppState::new(store)
    };

    let app = router::build(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    tracing::info!("{}", BANNER);
    tracing::info!("Server running on port {}", config.service_port);
    tracing::info!("CORS enabled for all origins");
    tracing::info!("Request logging activated");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("miniondoc stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
