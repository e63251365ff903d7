mod config;
mod error;
mod middleware;
mod routes;
mod seed;
mod state;

use std::sync::Arc;

use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;
use video_desk_core::events::EventBus;
use video_desk_core::{InMemoryStore, ListController, VideoGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting video dashboard API");

    // Store and its change feed
    let store = InMemoryStore::new(EventBus::new(config.event_bus_capacity));
    if let Some(path) = &config.seed_file {
        let loaded = seed::load_seed_file(&store, &config.collection, path).await?;
        tracing::info!(loaded, path = %path.display(), "Seeded video collection");
    }

    // Gateway and list controller; the controller subscribes immediately
    let gateway = Arc::new(VideoGateway::with_collection(
        store.clone(),
        config.collection.clone(),
    ));
    let controller = ListController::start(gateway).await;

    // Build application state
    let state = state::AppState::new(config.clone(), store, controller);

    // Build router with middleware
    let app = routes::build_router(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    // Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
