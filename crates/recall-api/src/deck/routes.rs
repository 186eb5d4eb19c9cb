use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use recall_gateway::GatewayError;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::model::{Deck, NewDeck};
use crate::{auth::CurrentUser, error::ApiError, state::ApiState};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks", get(list_decks).post(create_deck))
        .route("/decks/{deck_id}", get(get_deck).delete(delete_deck))
}

/// List every deck the caller's policy scope can see
async fn list_decks(
    caller: CurrentUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Deck>>, ApiError> {
    let decks: Vec<Deck> = state.gateway.table("decks", &caller.token).select().await?;

    Ok(Json(decks))
}

#[derive(Debug, Deserialize)]
struct CreateDeckRequest {
    #[serde(default)]
    name: Option<String>,
}

/// Create a deck owned by the caller
async fn create_deck(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Json(body): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Vec<Deck>>), ApiError> {
    let name = body
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("Deck name is required".to_string()))?;

    let inserted: Vec<Deck> = state
        .gateway
        .table("decks", &caller.token)
        .insert(&NewDeck {
            name,
            user_id: caller.user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Fetch a single deck by id
async fn get_deck(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<Deck>, ApiError> {
    let deck: Deck = state
        .gateway
        .table("decks", &caller.token)
        .eq("id", deck_id)
        .select_single()
        .await
        .map_err(|err| match err {
            GatewayError::NotFound => ApiError::NotFound("Deck"),
            other => other.into(),
        })?;

    Ok(Json(deck))
}

/// Delete a deck by id
///
/// Ownership is not checked here; the remote store's row-level policy
/// decides whether the delete applies.
async fn delete_deck(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let _removed: Vec<Deck> = state
        .gateway
        .table("decks", &caller.token)
        .eq("id", deck_id)
        .delete()
        .await?;

    Ok(Json(json!({ "message": "Deck deleted" })))
}
