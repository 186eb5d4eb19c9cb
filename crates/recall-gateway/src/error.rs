use serde::Deserialize;
use thiserror::Error;

/// Code the data API uses for a single-row fetch that matched no rows.
const NO_ROWS_CODE: &str = "PGRST116";

/// Failures raised by the remote identity and storage service.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway misconfigured: {0}")]
    Config(String),
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected gateway response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("{0}")]
    AuthRejected(String),
    #[error("row not found")]
    NotFound,
    #[error("{0}")]
    PolicyDenied(String),
    #[error("{0}")]
    Conflict(String),
    #[error("gateway error ({status}): {message}")]
    Service { status: u16, message: String },
}

/// Error body returned by the service.
///
/// The auth API reports under `msg` or `error_description`, the data API
/// under `message` with a machine `code`. Whichever field is present wins.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    code: Option<String>,
}

impl ErrorBody {
    fn message_or(self, fallback: &str) -> String {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .unwrap_or_else(|| fallback.to_string())
    }

    fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(NO_ROWS_CODE)
    }
}

/// Map a non-success response from the auth API to a typed error.
pub(crate) async fn classify_auth(res: reqwest::Response) -> GatewayError {
    let status = res.status().as_u16();
    let body: ErrorBody = res.json().await.unwrap_or_default();

    match status {
        401 => GatewayError::InvalidToken,
        409 | 422 => GatewayError::Conflict(body.message_or("conflict")),
        400 | 403 => GatewayError::AuthRejected(body.message_or("authentication rejected")),
        _ => GatewayError::Service {
            status,
            message: body.message_or("auth request failed"),
        },
    }
}

/// Map a non-success response from the data API to a typed error.
pub(crate) async fn classify_data(res: reqwest::Response) -> GatewayError {
    let status = res.status().as_u16();
    let body: ErrorBody = res.json().await.unwrap_or_default();

    match status {
        401 => GatewayError::InvalidToken,
        403 => GatewayError::PolicyDenied(body.message_or("permission denied")),
        404 => GatewayError::NotFound,
        406 if body.is_no_rows() => GatewayError::NotFound,
        409 => GatewayError::Conflict(body.message_or("conflict")),
        _ => GatewayError::Service {
            status,
            message: body.message_or("data request failed"),
        },
    }
}
