use axum::http::{HeaderMap, header};

use crate::error::ApiError;

/// Pull the bearer credential out of the `Authorization` header.
///
/// The header must be exactly two whitespace-separated parts with the first
/// literally `Bearer`. Anything else is rejected here, before the request
/// can reach the remote service.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingToken)?
        .to_str()
        .map_err(|_| ApiError::MalformedToken)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(ApiError::MalformedToken),
    }
}
