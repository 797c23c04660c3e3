pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::writing::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Writing pipeline API
        .route("/api/v1/writing/generate", post(handlers::handle_generate))
        .route("/api/v1/writing/check", post(handlers::handle_check))
        .route("/api/v1/writing/chat", post(handlers::handle_chat))
        .route("/api/v1/writing/export", post(handlers::handle_export))
        .route("/api/v1/writing/upload", post(handlers::handle_upload))
        .with_state(state)
}
