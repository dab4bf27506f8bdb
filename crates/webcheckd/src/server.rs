//! HTTP server for webcheckd

use crate::config::Config;
use crate::routes;
use crate::upstream::ValidatorClient;
use anyhow::{Context, Result};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers
pub struct AppState {
    pub validator: ValidatorClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(validator: ValidatorClient) -> Self {
        Self {
            validator,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router; `static_dir` enables the front-end fallback
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::validate_routes())
        .merge(routes::api_fallback_routes())
        .merge(routes::health_routes())
        .with_state(state);

    let app = match static_dir {
        Some(dir) => {
            info!("  Serving front-end from {}", dir.display());
            let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            app.fallback_service(spa)
        }
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    let validator = ValidatorClient::new(&config.upstream)?;
    let app = router(AppState::new(validator), config.server.static_dir.as_deref());

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
