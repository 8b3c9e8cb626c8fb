//! Candidate URL discovery through a web search API.
//!
//! Discovery is best-effort: without a search credential it never touches
//! the network, and any failure yields an empty list plus a warning.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::providers::ApiCredential;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Failures while querying the search API. Only ever logged.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("API error: HTTP {0}")]
    ApiError(reqwest::StatusCode),

    #[error("JSON parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    url: String,
}

/// Finds candidate URLs for a (rewritten) query.
#[derive(Debug)]
pub struct LinkDiscoverer {
    credential: Option<ApiCredential>,
    config: SearchConfig,
    client: reqwest::Client,
}

impl LinkDiscoverer {
    pub fn new(
        credential: Option<ApiCredential>,
        config: SearchConfig,
    ) -> Result<Self, DiscoveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DiscoveryError::HttpError(e.to_string()))?;

        Ok(Self {
            credential,
            config,
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Return up to `max_results` URLs, in API order.
    ///
    /// Empty when no credential is configured, the query is blank, or the
    /// call fails for any reason.
    pub async fn discover(&self, query: &str, max_results: usize) -> Vec<String> {
        let Some(credential) = &self.credential else {
            tracing::debug!("No search credential configured, skipping discovery");
            return Vec::new();
        };

        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.search(credential, query, max_results).await {
            Ok(urls) => {
                tracing::info!(query = %query, found = urls.len(), "Search discovery finished");
                urls
            }
            Err(e) => {
                tracing::warn!(
                    query = %query,
                    error = %e,
                    "Search discovery failed, continuing without results"
                );
                Vec::new()
            }
        }
    }

    async fn search(
        &self,
        credential: &ApiCredential,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, DiscoveryError> {
        let count = max_results.to_string();
        let response = self
            .client
            .get(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, credential.expose())
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("mkt", self.config.market.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DiscoveryError::Timeout(self.config.timeout)
                } else {
                    DiscoveryError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::ApiError(status));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::ParseError(e.to_string()))?;

        let urls = body
            .web_pages
            .map(|pages| pages.value)
            .unwrap_or_default()
            .into_iter()
            .map(|page| page.url)
            .take(max_results)
            .collect();

        Ok(urls)
    }
}
