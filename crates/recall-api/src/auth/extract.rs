use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use recall_gateway::{Gateway, GatewayError, User};

use super::token::bearer_token;
use crate::error::ApiError;

/// Authenticated caller extractor
///
/// Use this in route handlers to run the full authentication gate: bearer
/// extraction from the `Authorization` header, then token introspection at
/// the remote service. The raw token is kept alongside the resolved user so
/// the data call that follows runs under the caller's row-level policy
/// scope.
///
/// # Example
/// ```
/// use axum::extract::State;
/// use recall_api::{ApiState, auth::CurrentUser, error::ApiError};
///
/// async fn protected_route(
///     caller: CurrentUser,
///     State(state): State<ApiState>,
/// ) -> Result<(), ApiError> {
///     // caller.user.id and caller.token are available
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Gateway: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gateway = Gateway::from_ref(state);

        let token = bearer_token(&parts.headers)?.to_owned();

        // Introspection failures of any kind leave the caller
        // unauthenticated; only the logs keep the distinction between a bad
        // token and a service fault.
        let user = gateway.auth().get_user(&token).await.map_err(|err| {
            if !matches!(err, GatewayError::InvalidToken) {
                tracing::warn!("token introspection failed: {err}");
            }
            ApiError::InvalidToken
        })?;

        Ok(CurrentUser { user, token })
    }
}
