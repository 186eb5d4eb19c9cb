//! Query builder for the tabular data API.

use reqwest::{Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Gateway, GatewayError, error};

/// One table operation scoped to a caller's bearer token.
///
/// Built by [`Gateway::table`]. Filters accumulate, then exactly one of the
/// terminal operations issues a single HTTP request. Row-level policy at the
/// service runs as the user behind the token.
pub struct TableQuery<'a> {
    gateway: &'a Gateway,
    table: String,
    token: String,
    filters: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(gateway: &'a Gateway, table: &str, token: &str) -> Self {
        Self {
            gateway,
            table: table.to_string(),
            token: token.to_string(),
            filters: Vec::new(),
        }
    }

    /// Keep only rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Fetch all matching rows visible to the token's policy scope.
    pub async fn select<T: DeserializeOwned>(self) -> Result<Vec<T>, GatewayError> {
        tracing::debug!(table = %self.table, "select");
        let res = self
            .request(Method::GET)?
            .query(&[("select", "*")])
            .send()
            .await?;

        Self::rows(res).await
    }

    /// Fetch exactly one matching row.
    ///
    /// The service enforces the exactly-one assertion and reports zero
    /// matches as [`GatewayError::NotFound`].
    pub async fn select_single<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        tracing::debug!(table = %self.table, "select single");
        let res = self
            .request(Method::GET)?
            .query(&[("select", "*")])
            .header(header::ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(error::classify_data(res).await);
        }
        Ok(res.json().await?)
    }

    /// Insert `row` and return the inserted representation.
    pub async fn insert<T: DeserializeOwned>(
        self,
        row: &impl Serialize,
    ) -> Result<Vec<T>, GatewayError> {
        tracing::debug!(table = %self.table, "insert");
        let res = self
            .request(Method::POST)?
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        Self::rows(res).await
    }

    /// Apply a partial update to the matching rows and return them.
    pub async fn update<T: DeserializeOwned>(
        self,
        changes: &impl Serialize,
    ) -> Result<Vec<T>, GatewayError> {
        tracing::debug!(table = %self.table, "update");
        let res = self
            .request(Method::PATCH)?
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;

        Self::rows(res).await
    }

    /// Delete the matching rows and return what was removed.
    pub async fn delete<T: DeserializeOwned>(self) -> Result<Vec<T>, GatewayError> {
        tracing::debug!(table = %self.table, "delete");
        let res = self
            .request(Method::DELETE)?
            .header("Prefer", "return=representation")
            .send()
            .await?;

        Self::rows(res).await
    }

    fn request(&self, method: Method) -> Result<RequestBuilder, GatewayError> {
        let url = self.gateway.endpoint(&format!("/rest/v1/{}", self.table))?;

        Ok(self
            .gateway
            .http
            .request(method, url)
            .header("apikey", &self.gateway.service_key)
            .bearer_auth(&self.token)
            .query(&self.filters))
    }

    async fn rows<T: DeserializeOwned>(res: reqwest::Response) -> Result<Vec<T>, GatewayError> {
        if !res.status().is_success() {
            return Err(error::classify_data(res).await);
        }
        Ok(res.json().await?)
    }
}
