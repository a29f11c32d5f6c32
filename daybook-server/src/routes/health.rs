//! Health endpoint used as the clients' reconnect probe

use axum::{Json, Router, routing::get};

use crate::routes::events::MessageResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "ok".to_string(),
    })
}
