use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use plex_backend::{LookupKey, LookupTarget, OracleError};
use serde::Deserialize;
use thiserror::Error;

pub const ITUNES_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// The first matching store listing, as far as the host cares about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreListing {
    pub version: Option<String>,
    pub track_view_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to build store lookup client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid store lookup url: {0}")]
    InvalidUrl(String),
    #[error("store lookup request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("store lookup failed with HTTP {status}{body_snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },
    #[error("failed to parse store lookup response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl From<LookupError> for OracleError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Client(_) | LookupError::Request(_) | LookupError::HttpStatus { .. } => {
                OracleError::unreachable_from("store lookup", err)
            }
            LookupError::InvalidUrl(_) | LookupError::Parse(_) => {
                OracleError::malformed_from("store lookup", err)
            }
        }
    }
}

/// Remote store-lookup oracle.
#[async_trait]
pub trait StoreLookup: Send + Sync {
    async fn lookup(&self, target: &LookupTarget) -> Result<StoreListing, LookupError>;
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Deserialize)]
struct LookupResult {
    #[serde(default)]
    version: Option<String>,
    #[serde(default, rename = "trackViewUrl")]
    track_view_url: Option<String>,
}

/// Store lookup against the public iTunes lookup endpoint.
#[derive(Debug, Clone)]
pub struct ItunesLookup {
    client: reqwest::Client,
    base_url: String,
}

impl ItunesLookup {
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("plex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self::with_client(client))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: ITUNES_LOOKUP_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn lookup_url(&self, target: &LookupTarget) -> Result<reqwest::Url, LookupError> {
        let mut params = vec![match &target.key {
            LookupKey::StoreId(id) => ("id", id.as_str()),
            LookupKey::BundleId(bundle_id) => ("bundleId", bundle_id.as_str()),
        }];
        if let Some(country) = target.country_code.as_deref().filter(|c| !c.is_empty()) {
            params.push(("country", country));
        }

        reqwest::Url::parse_with_params(&self.base_url, &params)
            .map_err(|error| LookupError::InvalidUrl(error.to_string()))
    }
}

#[async_trait]
impl StoreLookup for ItunesLookup {
    async fn lookup(&self, target: &LookupTarget) -> Result<StoreListing, LookupError> {
        let url = self.lookup_url(target)?;
        debug!("Store lookup: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(LookupError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(LookupError::HttpStatus {
                status,
                body_snippet,
            });
        }

        let body = response.text().await.map_err(LookupError::Request)?;
        parse_listing(&body)
    }
}

/// Read the first result of a lookup response; no results is an empty listing.
pub(crate) fn parse_listing(body: &str) -> Result<StoreListing, LookupError> {
    let response: LookupResponse = serde_json::from_str(body).map_err(LookupError::Parse)?;

    Ok(response
        .results
        .into_iter()
        .next()
        .map(|first| StoreListing {
            version: first.version,
            track_view_url: first.track_view_url,
        })
        .unwrap_or_default())
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
