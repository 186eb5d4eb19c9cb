use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use recall_gateway::{AuthResponse, Credentials};
use serde::Deserialize;
use serde_json::json;

use super::{CurrentUser, token::bearer_token};
use crate::{error::ApiError, state::ApiState};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/user", get(current_user))
}

#[derive(Debug, Deserialize)]
struct CredentialsRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl CredentialsRequest {
    /// Presence check only; credential quality is the identity service's call.
    fn into_credentials(self) -> Result<Credentials, ApiError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok(Credentials { email, password })
            }
            _ => Err(ApiError::Validation(
                "Email and Password are required".to_string(),
            )),
        }
    }
}

/// Register a new account with the identity service
async fn signup(
    State(state): State<ApiState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let credentials = body.into_credentials()?;
    let res = state.gateway.auth().sign_up(&credentials).await?;

    Ok((StatusCode::CREATED, Json(res)))
}

/// Exchange credentials for a session
async fn login(
    State(state): State<ApiState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let credentials = body.into_credentials()?;
    let res = state.gateway.auth().sign_in(&credentials).await?;

    Ok(Json(res))
}

/// Invalidate the caller's session, when one is presented
///
/// Callers without a usable bearer still get a successful logout; there is
/// no session to revoke.
async fn logout(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Ok(token) = bearer_token(&headers) {
        state.gateway.auth().sign_out(token).await?;
    }

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// Resolve the caller's bearer token to their identity record
async fn current_user(caller: CurrentUser) -> Json<serde_json::Value> {
    Json(json!({ "user": caller.user }))
}
