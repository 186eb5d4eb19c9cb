use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck row as stored by the remote table API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Row id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Owning user id
    pub user_id: Uuid,
    /// Set by the remote store on insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new deck; the store fills in id and created_at
#[derive(Debug, Serialize)]
pub struct NewDeck {
    pub name: String,
    pub user_id: Uuid,
}
