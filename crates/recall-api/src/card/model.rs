use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flashcard row as stored by the remote table API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    /// Row id
    pub id: Uuid,
    /// Deck this card belongs to
    pub deck_id: Uuid,
    /// Prompt side
    pub question: String,
    /// Answer side
    pub answer: String,
    /// Owning user id
    pub user_id: Uuid,
    /// Set by the remote store on insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new flashcard
#[derive(Debug, Serialize)]
pub struct NewFlashcard {
    pub deck_id: Uuid,
    pub question: String,
    pub answer: String,
    pub user_id: Uuid,
}
