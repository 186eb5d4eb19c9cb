use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recall_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;

/// Request-level failures, each mapped to a deliberate status code.
///
/// Gateway failures are converted rather than passed through wholesale, so
/// a missing row, a policy rejection, and an unreachable service stay
/// distinguishable to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing Token")]
    MissingToken,
    #[error("Invalid token format")]
    MalformedToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingToken | Self::MalformedToken | Self::InvalidToken | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidToken => Self::InvalidToken,
            GatewayError::AuthRejected(msg) => Self::Unauthorized(msg),
            GatewayError::NotFound => Self::NotFound("Row"),
            GatewayError::PolicyDenied(msg) => Self::Forbidden(msg),
            GatewayError::Conflict(msg) => Self::Conflict(msg),
            GatewayError::Transport(e) => Self::Upstream(e.to_string()),
            GatewayError::Decode(e) => Self::Upstream(e.to_string()),
            GatewayError::Config(msg) => Self::Upstream(msg),
            GatewayError::Service { message, .. } => Self::Upstream(message),
        }
    }
}
