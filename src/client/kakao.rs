//! Kakao (Daum) blog search client.
//!
//! Sends `GET {endpoint}?query=..&size=..` with a `KakaoAK` authorization
//! header and decodes the `documents` array of the response. Every failure
//! is reported as a [`SearchFailed`] so the pipeline can surface it as an
//! alert without inspecting transport details.

use super::{SearchClient, SearchResult};
use crate::domain::error::{BlogSearchError, Result};
use crate::domain::{BlogDocument, BlogPayload, SearchFailed};
use crate::Config;
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default Kakao blog search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dapi.kakao.com/v2/search/blog";

/// Highlight markup the API wraps around matched terms.
const HIGHLIGHT_TAGS: [&str; 2] = ["<b>", "</b>"];

/// reqwest-backed [`SearchClient`] for the Kakao blog search API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct KakaoSearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    page_size: u32,
}

impl std::fmt::Debug for KakaoSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoSearchClient")
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl KakaoSearchClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Config`] if the configuration is invalid
    /// (missing API key, bad endpoint, page size out of range) or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BlogSearchError::Config("api_key is required".to_string()))?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder
            .build()
            .map_err(|e| BlogSearchError::Config(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(
            endpoint = %config.endpoint,
            page_size = config.page_size,
            timeout_ms = ?config.request_timeout_ms,
            "kakao search client ready"
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            page_size: config.page_size,
        })
    }

    /// Builds the request URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchFailed`] if the endpoint is not a valid URL.
    pub fn request_url(&self, query: &str) -> std::result::Result<Url, SearchFailed> {
        let size = self.page_size.to_string();
        Url::parse_with_params(&self.endpoint, [("query", query), ("size", size.as_str())])
            .map_err(SearchFailed::invalid_url)
    }

    async fn execute(&self, query: &str) -> SearchResult {
        let url = self.request_url(query)?;

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(SearchFailed::network)?;

        let status = response.status();
        let body = response.text().await.map_err(SearchFailed::network)?;

        if !status.is_success() {
            return Err(SearchFailed::status(status.as_u16(), &body));
        }

        let payload = decode_payload(&body)?;
        tracing::debug!(documents = payload.len(), "search response decoded");
        Ok(payload)
    }
}

impl SearchClient for KakaoSearchClient {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchResult> {
        let this = self.clone();
        let query = query.to_string();
        Box::pin(async move { this.execute(&query).await })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    documents: Vec<DocumentDto>,
}

#[derive(Debug, Deserialize)]
struct DocumentDto {
    title: Option<String>,
    blogname: Option<String>,
    thumbnail: Option<String>,
    datetime: Option<String>,
}

impl From<DocumentDto> for BlogDocument {
    fn from(dto: DocumentDto) -> Self {
        Self {
            thumbnail: dto.thumbnail,
            name: dto.blogname.as_deref().map(strip_highlight),
            title: dto.title.as_deref().map(strip_highlight),
            datetime: dto.datetime.as_deref().and_then(parse_datetime),
        }
    }
}

/// Decodes a search response body into a [`BlogPayload`].
///
/// # Errors
///
/// Returns a [`SearchFailed`] if the body is not JSON or lacks `documents`.
pub fn decode_payload(body: &str) -> SearchResult {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(SearchFailed::invalid_json)?;

    Ok(BlogPayload::new(
        response.documents.into_iter().map(BlogDocument::from).collect(),
    ))
}

fn strip_highlight(text: &str) -> String {
    HIGHLIGHT_TAGS
        .iter()
        .fold(text.to_string(), |acc, tag| acc.replace(tag, ""))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::trace!(datetime = %raw, error = %e, "unparseable datetime");
            None
        }
    }
}
