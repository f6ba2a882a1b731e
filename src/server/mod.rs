//! Scrawl server module
//!
//! Web server for the digit recognition service. Serves the drawing grid
//! page and a small REST API around one pre-trained classifier.

mod api;
mod error;
mod state;
mod handlers;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::model::OnnxDigitModel;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("SCRAWL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SCRAWL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/digit_cnn.onnx".to_string()),
        }
    }
}

/// Start the server with the given configuration.
///
/// The model artifact is loaded exactly once, before the listener binds.
/// A missing or unreadable artifact aborts startup; the server never comes
/// up without a working classifier.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        model_path = %config.model_path,
        started_at = %start_time.to_rfc3339(),
        "Loading model artifact"
    );

    let model = OnnxDigitModel::load(&config.model_path)?;
    let model_info = model.info().clone();

    let state = Arc::new(AppState::new(config.clone(), Arc::new(model), model_info));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        host = %config.host,
        port = config.port,
        address = %addr,
        "Scrawl server starting"
    );
    info!(url = %format!("http://{}", addr), "Drawing grid available");
    info!(url = %format!("http://{}/api", addr), "REST API available");
    info!(url = %format!("http://{}/api/health", addr), "Health endpoint available");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    // Graceful shutdown on ctrl+c
    let start_time_for_shutdown = start_time;
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time_for_shutdown);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    info!("Server started successfully (press ctrl+c to stop)");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
