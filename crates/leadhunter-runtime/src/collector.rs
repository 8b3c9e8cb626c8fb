//! Evidence collection over a URL list.

use std::sync::Arc;

use leadhunter_core::{dedup_and_cap, EvidenceRecord, MAX_URLS};

use crate::fetcher::PageFetcher;

/// Fetches every URL of a list, one after another.
pub struct EvidenceCollector {
    fetcher: Arc<dyn PageFetcher>,
    max_urls: usize,
}

impl EvidenceCollector {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            max_urls: MAX_URLS,
        }
    }

    /// Override the URL cap.
    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    /// One record per distinct URL, in first-seen order, at most `max_urls`.
    ///
    /// Failed fetches stay in the output as non-ok records.
    pub async fn collect(&self, urls: &[String]) -> Vec<EvidenceRecord> {
        let urls = dedup_and_cap(urls.iter().cloned(), self.max_urls);
        let mut records = Vec::with_capacity(urls.len());

        for url in &urls {
            tracing::debug!(url = %url, "Fetching evidence");
            records.push(self.fetcher.fetch(url).await);
        }

        let failed = records.iter().filter(|r| !r.ok).count();
        tracing::info!(urls = records.len(), failed, "Evidence collected");
        records
    }
}

impl std::fmt::Debug for EvidenceCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceCollector")
            .field("max_urls", &self.max_urls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records calls; URLs containing "down" fail.
    #[derive(Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for RecordingFetcher {
        async fn fetch(&self, url: &str) -> EvidenceRecord {
            self.calls.lock().push(url.to_string());
            if url.contains("down") {
                EvidenceRecord::failure(url, "ERROR: Connect: refused")
            } else {
                EvidenceRecord::page(url, "Title", "body")
            }
        }
    }

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_dedup_and_order() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let collector = EvidenceCollector::new(fetcher.clone());

        let records = collector
            .collect(&urls(&["https://b.test", "https://a.test", "https://b.test"]))
            .await;

        let seen: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(seen, vec!["https://b.test", "https://a.test"]);
        assert_eq!(*fetcher.calls.lock(), urls(&["https://b.test", "https://a.test"]));
    }

    #[tokio::test]
    async fn test_cap_at_twelve() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let collector = EvidenceCollector::new(fetcher.clone());

        let input: Vec<String> = (0..20).map(|i| format!("https://{}.test", i)).collect();
        let records = collector.collect(&input).await;

        assert_eq!(records.len(), MAX_URLS);
        assert_eq!(fetcher.calls.lock().len(), MAX_URLS);
        assert_eq!(records[11].url, "https://11.test");
    }

    #[tokio::test]
    async fn test_failures_are_kept() {
        let collector = EvidenceCollector::new(Arc::new(RecordingFetcher::default()));

        let records = collector
            .collect(&urls(&["https://up.test", "https://down.test"]))
            .await;

        assert_eq!(records.len(), 2);
        assert!(records[0].ok);
        assert!(!records[1].ok);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let collector = EvidenceCollector::new(fetcher.clone()).with_max_urls(3);
        assert!(collector.collect(&[]).await.is_empty());
        assert!(fetcher.calls.lock().is_empty());
    }
}
