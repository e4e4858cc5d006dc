//! Signed HTTP client for the DAM API

use std::fmt;
use std::time::Duration;

use crate::error::ApiError;
use crate::query::Query;
use crate::response::{parse_resolved_url, SearchResponse};
use crate::sign::sign;
use crate::Result;

#[derive(Clone)]
pub struct DamClient {
    http: reqwest::Client,
    /// Endpoint prefix, including its trailing `?`
    base_url: String,
    user: String,
    secret: String,
}

impl DamClient {
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, base_url, user, secret))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        user: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            user: user.into(),
            secret: secret.into(),
        }
    }

    pub fn search_query(&self, text: &str) -> Query {
        Query::search(&self.user, text)
    }

    pub fn resolve_query(&self, resource_ref: &str, extension: &str) -> Query {
        Query::resolve(&self.user, resource_ref, extension)
    }

    /// Full request URL: `base_url + query + "&sign=" + signature`
    pub fn signed_url(&self, query: &Query) -> String {
        let query = query.to_string();
        let signature = sign(&self.secret, &query);
        format!("{}{}&sign={}", self.base_url, query, signature)
    }

    /// Run `search_get_previews` for `text`
    pub async fn search(&self, text: &str) -> Result<SearchResponse> {
        let body = self.call(&self.search_query(text)).await?;
        SearchResponse::from_slice(&body)
    }

    /// Run `get_resource_path` and return the direct file URL
    pub async fn resolve_path(&self, resource_ref: &str, extension: &str) -> Result<String> {
        let body = self.call(&self.resolve_query(resource_ref, extension)).await?;
        parse_resolved_url(&body)
    }

    async fn call(&self, query: &Query) -> Result<Vec<u8>> {
        tracing::debug!(
            function = %query.function(),
            query = %query,
            "Calling DAM API"
        );

        let response = self.http.get(self.signed_url(query)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                function: query.function().to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl fmt::Debug for DamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DamClient")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}
