//! Auth operations: account creation, password sign-in, sign-out, and
//! token-to-user resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Gateway, GatewayError, error};

/// Email and password pair for sign-up and sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Identity record owned by the remote service.
///
/// Only `id` is load-bearing for this backend (it becomes the owner column
/// of created rows); the rest rides along into responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<Value>,
}

/// Bearer session minted by the service on sign-up or sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Outcome of a sign-up or sign-in call.
///
/// The service answers with either a bare user (sign-up awaiting email
/// confirmation) or a session with the user embedded. Both fields are
/// explicit options so callers never probe a dynamic shape; absent fields
/// serialize as JSON null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// Auth API of the remote service.
pub struct AuthApi<'a> {
    pub(crate) gateway: &'a Gateway,
}

impl AuthApi<'_> {
    /// Register a new account with email and password.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        let url = self.gateway.endpoint("/auth/v1/signup")?;
        let res = self
            .gateway
            .http
            .post(url)
            .header("apikey", &self.gateway.service_key)
            .json(credentials)
            .send()
            .await?;

        Self::auth_response(res).await
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        let mut url = self.gateway.endpoint("/auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let res = self
            .gateway
            .http
            .post(url)
            .header("apikey", &self.gateway.service_key)
            .json(credentials)
            .send()
            .await?;

        Self::auth_response(res).await
    }

    /// Revoke the session behind `token`.
    pub async fn sign_out(&self, token: &str) -> Result<(), GatewayError> {
        let url = self.gateway.endpoint("/auth/v1/logout")?;
        let res = self
            .gateway
            .http
            .post(url)
            .header("apikey", &self.gateway.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(error::classify_auth(res).await)
        }
    }

    /// Resolve a bearer token to the user it belongs to.
    pub async fn get_user(&self, token: &str) -> Result<User, GatewayError> {
        let url = self.gateway.endpoint("/auth/v1/user")?;
        let res = self
            .gateway
            .http
            .get(url)
            .header("apikey", &self.gateway.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(match error::classify_auth(res).await {
                // Introspection rejections all mean the same thing to the
                // caller: this token does not resolve to a user.
                GatewayError::AuthRejected(_) => GatewayError::InvalidToken,
                other => other,
            });
        }

        Ok(res.json().await?)
    }

    /// Normalize the service's two response shapes into an [`AuthResponse`].
    async fn auth_response(res: reqwest::Response) -> Result<AuthResponse, GatewayError> {
        if !res.status().is_success() {
            return Err(error::classify_auth(res).await);
        }

        let value: Value = res.json().await?;
        if value.get("access_token").is_some() {
            let session: Session = serde_json::from_value(value)?;
            let user = session.user.clone();
            Ok(AuthResponse {
                user,
                session: Some(session),
            })
        } else {
            let user: User = serde_json::from_value(value)?;
            Ok(AuthResponse {
                user: Some(user),
                session: None,
            })
        }
    }
}
