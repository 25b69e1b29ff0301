use crate::handlers;
use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::Router;
use doctalk_chat::ChatOrchestrator;
use doctalk_session::SessionStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
    pub sessions: Arc<dyn SessionStore>,
}

/// The main gateway server.
pub struct GatewayServer;

impl GatewayServer {
    /// Builds the gateway router. `max_upload_bytes` caps document uploads;
    /// everything else uses axum's default body limit.
    pub fn build(
        orchestrator: Arc<ChatOrchestrator>,
        sessions: Arc<dyn SessionStore>,
        max_upload_bytes: usize,
    ) -> Router {
        let state = Arc::new(AppState {
            orchestrator,
            sessions,
        });

        Router::new()
            .route("/health", get(health_handler))
            .route("/sessions", post(handlers::create_session))
            .route("/sessions/{id}", delete(handlers::delete_session))
            .route(
                "/sessions/{id}/documents",
                post(handlers::upload_document).layer(DefaultBodyLimit::max(max_upload_bytes)),
            )
            .route("/sessions/{id}/chat", post(handlers::chat))
            .route("/sessions/{id}/reset", post(handlers::reset))
            .route("/sessions/{id}/history", get(handlers::history))
            .with_state(state)
    }
}

async fn health_handler() -> impl IntoResponse {
    serde_json::json!({"status": "ok", "service": "doctalk"}).to_string()
}
