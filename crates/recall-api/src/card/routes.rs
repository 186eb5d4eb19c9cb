use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::model::{Flashcard, NewFlashcard};
use crate::{auth::CurrentUser, error::ApiError, state::ApiState};

/// Create the flashcard routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/cards", post(create_card))
        // GET takes a deck id, PUT and DELETE a card id; the route table
        // needs a single parameter name for the shared segment.
        .route(
            "/cards/{id}",
            get(list_cards).put(update_card).delete(delete_card),
        )
}

/// List the flashcards of one deck
async fn list_cards(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let cards: Vec<Flashcard> = state
        .gateway
        .table("flashcards", &caller.token)
        .eq("deck_id", deck_id)
        .select()
        .await?;

    Ok(Json(cards))
}

#[derive(Debug, Deserialize)]
struct CreateCardRequest {
    #[serde(default)]
    deck_id: Option<Uuid>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

/// Create a flashcard owned by the caller
async fn create_card(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Json(body): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Vec<Flashcard>>), ApiError> {
    let (deck_id, question, answer) = match (body.deck_id, body.question, body.answer) {
        (Some(deck_id), Some(question), Some(answer))
            if !question.is_empty() && !answer.is_empty() =>
        {
            (deck_id, question, answer)
        }
        _ => {
            return Err(ApiError::Validation(
                "Deck ID, question, and answer are required".to_string(),
            ));
        }
    };

    let inserted: Vec<Flashcard> = state
        .gateway
        .table("flashcards", &caller.token)
        .insert(&NewFlashcard {
            deck_id,
            question,
            answer,
            user_id: caller.user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Apply a partial update to a flashcard
///
/// The payload is forwarded to the store as-is; there is no field
/// allow-list. Unknown columns come back as a store rejection.
async fn update_card(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Path(card_id): Path<Uuid>,
    Json(changes): Json<serde_json::Value>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let changes = changes
        .as_object()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("Update payload is required".to_string()))?;

    let updated: Vec<Flashcard> = state
        .gateway
        .table("flashcards", &caller.token)
        .eq("id", card_id)
        .update(changes)
        .await?;

    Ok(Json(updated))
}

/// Delete a flashcard by id
///
/// Ownership is not checked here; the remote store's row-level policy
/// decides whether the delete applies.
async fn delete_card(
    caller: CurrentUser,
    State(state): State<ApiState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let _removed: Vec<Flashcard> = state
        .gateway
        .table("flashcards", &caller.token)
        .eq("id", card_id)
        .delete()
        .await?;

    Ok(Json(json!({ "message": "Card deleted" })))
}
