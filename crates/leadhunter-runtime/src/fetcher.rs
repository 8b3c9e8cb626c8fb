//! Page fetching.
//!
//! A fetch is a single bounded GET. Failures are folded into a non-ok
//! [`EvidenceRecord`] whose text reads `ERROR: <Category>: <detail>`, so a
//! batch never aborts on one bad URL.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use leadhunter_core::{extract_page_with_limits, EvidenceRecord};

use crate::config::FetchConfig;

/// Why a page could not be fetched. The variant name is the category shown
/// in the evidence text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Timeout: no response after {0:?}")]
    Timeout(Duration),

    #[error("Connect: {0}")]
    Connect(String),

    #[error("Status: HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Request: {0}")]
    Request(String),

    #[error("Body: {0}")]
    Body(String),
}

impl FetchError {
    fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout)
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }

    /// Text stored in a failed evidence record.
    pub fn to_evidence_text(&self) -> String {
        format!("ERROR: {}", self)
    }
}

/// Turns a URL into evidence.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one URL. Never fails: errors become a non-ok record.
    async fn fetch(&self, url: &str) -> EvidenceRecord;
}

/// [`PageFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_title_chars: usize,
    max_text_chars: usize,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.timeout,
            max_title_chars: config.max_title_chars,
            max_text_chars: config.max_text_chars,
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> EvidenceRecord {
        match self.fetch_html(url).await {
            Ok(html) => {
                let page =
                    extract_page_with_limits(&html, self.max_title_chars, self.max_text_chars);
                tracing::debug!(
                    url = %url,
                    title = %page.title,
                    chars = page.text.len(),
                    "Fetched page"
                );
                EvidenceRecord {
                    url: url.to_string(),
                    ok: true,
                    title: page.title,
                    text: page.text,
                }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Page fetch failed");
                EvidenceRecord::failure(url, e.to_evidence_text())
            }
        }
    }
}
