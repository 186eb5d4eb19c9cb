use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{auth, card, deck, state::ApiState};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/", get(health))
        .merge(auth::routes())
        .merge(deck::routes())
        .merge(card::routes())
        .fallback(handler_404)
}

/// Liveness probe
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Flashcard API is running"
    }))
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
