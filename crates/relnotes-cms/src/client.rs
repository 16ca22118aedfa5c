//! HTTP client for the CMS REST API (`GET <base>/items/<collection>`).

use std::time::Duration;

use relnotes_core::ParseError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("response from {endpoint} has no data")]
    MissingData { endpoint: String },
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] header::InvalidHeaderValue),
}

/// Query string for an items request. Parameters are sent in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `filter[<field>][_eq]=<value>`
    pub fn filter_eq(mut self, field: &str, value: &str) -> Self {
        self.params
            .push((format!("filter[{field}][_eq]"), value.to_string()));
        self
    }

    /// `filter[<field>][_in]=<a>,<b>`
    pub fn filter_in(mut self, field: &str, values: &[&str]) -> Self {
        self.params
            .push((format!("filter[{field}][_in]"), values.join(",")));
        self
    }

    /// `fields=<a>,<b>`; nested relations use dot paths.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.params.push(("fields".to_string(), fields.join(",")));
        self
    }

    /// `sort[]=<key>`; prefix the key with `-` for descending order.
    pub fn sort(mut self, key: &str) -> Self {
        self.params.push(("sort[]".to_string(), key.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// The `{ "data": ... }` wrapper around every CMS response.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Thin CMS REST client. Every call is a fresh round trip; nothing is cached.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Create a client for the given CMS base URL, e.g. `https://cms.example.com`.
    ///
    /// The token is sent as a bearer `Authorization` header on every request.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, CmsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `endpoint` and unwrap the `data` envelope.
    ///
    /// `Ok(None)` means the CMS answered successfully with no `data`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<Option<T>, CmsError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(url = %url, params = query.params().len(), "fetching from CMS");
        let resp = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-store")
            .query(query.params())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CmsError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}
