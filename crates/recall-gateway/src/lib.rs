//! Client for the hosted identity and storage service.
//!
//! The service exposes two HTTP APIs: an auth API (sign-up, sign-in,
//! sign-out, token introspection) and a tabular data API (select, insert,
//! update, delete with filter predicates) whose row-level policies run under
//! the bearer token attached to each call.

pub mod auth;
pub mod error;
pub mod table;

pub use auth::{AuthApi, AuthResponse, Credentials, Session, User};
pub use error::GatewayError;
pub use table::TableQuery;

use reqwest::Url;

/// Handle to the remote identity and storage service.
///
/// Cheap to clone and safe to share across request tasks. Credentials are a
/// per-call parameter; the handle itself carries no request state, so
/// concurrent requests cannot race on a shared token.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    service_key: String,
}

impl Gateway {
    /// Create a client for the service at `base_url`, authenticated with the
    /// privileged service key.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            service_key: service_key.into(),
        })
    }

    /// Auth operations of the service.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { gateway: self }
    }

    /// Start a query against `table`, scoped to the caller's bearer token.
    ///
    /// The token applies to this one query only. Row-level policy checks at
    /// the service run as the user behind the token.
    pub fn table(&self, table: &str, token: &str) -> TableQuery<'_> {
        TableQuery::new(self, table, token)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Config(format!("invalid endpoint path {path:?}: {e}")))
    }
}
