//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{get_room_detail, health_check, join, upload, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Room for the multipart framing around the uploaded file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the router serving every endpoint of the relay
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .upload_file_usecase
        .policy()
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/join", post(join))
        .route(
            "/api/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/health", get(health_check))
        .route("/api/rooms/{code}", get(get_room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Room-based chat relay server
///
/// # Example
///
/// ```ignore
/// let state = AppState::in_memory(config.upload.clone(), Arc::new(SystemClock));
/// Server::new(config, state).run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Bind to the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let local_addr = listener.local_addr()?;
        let app = router(self.state);

        tracing::info!("Chat relay listening on {}", local_addr);
        tracing::info!("Join via: http://{}/api/join", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
