//! End-to-end validation pipeline.
//!
//! One call to [`ValidationPipeline::validate`]:
//! 1. Gather URLs (manual list, uploaded table, optional auto-search)
//! 2. Deduplicate and cap them
//! 3. Collect evidence, one fetch at a time
//! 4. Evaluate with the model, or the keyword fallback, or the demo message
//! 5. Append exactly one history record
//!
//! Nothing in here is fatal: every failure is folded into the report or
//! logged.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use leadhunter_core::{
    parse_manual, parse_url_table, rewrite_query, Availability, Category, EvidenceRecord,
    FallbackEvaluator, HistoryRecord, HistorySink, Language, ValidationRequest, Verdict,
    DEMO_MESSAGE,
};

use crate::collector::EvidenceCollector;
use crate::config::RuntimeConfig;
use crate::discovery::{DiscoveryError, LinkDiscoverer};
use crate::evaluator::ModelEvaluator;
use crate::fetcher::{FetchError, HttpPageFetcher, PageFetcher};
use crate::history::CsvHistoryLog;
use crate::providers::{CompletionConfig, Credentials, LlmProvider, ProviderError};

/// Errors building a pipeline. Running one never fails.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to set up page fetcher: {0}")]
    Fetcher(#[from] FetchError),

    #[error("Failed to set up search client: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to set up model provider: {0}")]
    Provider(#[from] ProviderError),
}

/// Uploaded URL table as received by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTable {
    /// Raw file contents
    Data(Vec<u8>),
    /// The upload could not be read at all
    Unreadable(String),
}

/// Raw inputs for one validation. Any subset may be empty.
#[derive(Debug, Clone, Default)]
pub struct ValidationInput {
    pub language: Language,
    pub category: Category,
    pub context: String,
    /// Newline-delimited URL list
    pub manual_urls: String,
    pub url_table: Option<UrlTable>,
    /// Raw query for auto-search; blank disables discovery
    pub auto_search_query: String,
}

impl ValidationInput {
    pub fn new(language: Language, category: Category) -> Self {
        Self {
            language,
            category,
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_manual_urls(mut self, urls: impl Into<String>) -> Self {
        self.manual_urls = urls.into();
        self
    }

    pub fn with_url_table(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.url_table = Some(UrlTable::Data(data.into()));
        self
    }

    pub fn with_unreadable_url_table(mut self, reason: impl Into<String>) -> Self {
        self.url_table = Some(UrlTable::Unreadable(reason.into()));
        self
    }

    pub fn with_auto_search(mut self, query: impl Into<String>) -> Self {
        self.auto_search_query = query.into();
        self
    }
}

/// Which path produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatedBy {
    Model,
    Fallback,
    Demo,
}

/// Outcome of one validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub language: Language,
    pub category: Category,
    /// URLs that were fetched, in order
    pub urls: Vec<String>,
    pub evidence: Vec<EvidenceRecord>,
    pub verdict: Verdict,
    pub evaluated_by: EvaluatedBy,
    /// User-visible input problem, e.g. an unreadable CSV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// The validation pipeline.
pub struct ValidationPipeline {
    collector: EvidenceCollector,
    discoverer: LinkDiscoverer,
    evaluator: ModelEvaluator,
    fallback: FallbackEvaluator,
    history: Arc<dyn HistorySink>,
    max_search_results: usize,
}

impl ValidationPipeline {
    pub fn builder() -> ValidationPipelineBuilder {
        ValidationPipelineBuilder::new()
    }

    /// Run one validation.
    pub async fn validate(&self, input: ValidationInput) -> ValidationReport {
        let (urls, notice) = self.gather_urls(&input).await;

        let request = ValidationRequest::new(
            input.language,
            input.category,
            input.context,
            urls,
            input.auto_search_query,
        );
        tracing::info!(
            language = request.language().tag(),
            category = request.category().tag(),
            urls = request.urls().len(),
            "Starting validation"
        );

        let evidence = self.collector.collect(request.urls()).await;
        let fetched: Vec<String> = evidence.iter().map(|record| record.url.clone()).collect();

        let (verdict, evaluated_by) = self.evaluate(&request, &evidence).await;
        tracing::info!(evaluated_by = ?evaluated_by, "Validation finished");

        self.record_history(&request, &fetched, &verdict);

        ValidationReport {
            language: request.language(),
            category: request.category(),
            urls: fetched,
            evidence,
            verdict,
            evaluated_by,
            notice,
        }
    }

    async fn gather_urls(&self, input: &ValidationInput) -> (Vec<String>, Option<String>) {
        let mut urls = parse_manual(&input.manual_urls);
        let mut notice = None;

        match &input.url_table {
            Some(UrlTable::Data(data)) => match parse_url_table(data) {
                Ok(table_urls) => urls.extend(table_urls),
                Err(e) => {
                    tracing::warn!(error = %e, "URL table could not be parsed");
                    notice = Some(csv_notice(&e));
                }
            },
            Some(UrlTable::Unreadable(reason)) => {
                tracing::warn!(reason = %reason, "URL table could not be read");
                notice = Some(csv_notice(reason));
            }
            None => {}
        }

        let raw_query = input.auto_search_query.trim();
        if !raw_query.is_empty() {
            let query = rewrite_query(raw_query, input.category);
            tracing::debug!(query = %query, "Rewritten search query");
            urls.extend(self.discoverer.discover(&query, self.max_search_results).await);
        }

        (urls, notice)
    }

    async fn evaluate(
        &self,
        request: &ValidationRequest,
        evidence: &[EvidenceRecord],
    ) -> (Verdict, EvaluatedBy) {
        let model_verdict = self
            .evaluator
            .evaluate(request.language(), request.category(), request.context(), evidence)
            .await;

        match model_verdict {
            Availability::Available(verdict) => (verdict, EvaluatedBy::Model),
            Availability::Unavailable if !evidence.is_empty() => {
                let rows = self.fallback.evaluate(
                    request.category(),
                    evidence,
                    request.context(),
                    request.language(),
                );
                (Verdict::Rows(rows), EvaluatedBy::Fallback)
            }
            Availability::Unavailable => {
                (Verdict::FreeText(DEMO_MESSAGE.to_string()), EvaluatedBy::Demo)
            }
        }
    }

    fn record_history(&self, request: &ValidationRequest, urls: &[String], verdict: &Verdict) {
        let record = HistoryRecord::for_verdict(
            request.language(),
            request.category(),
            request.context(),
            urls,
            verdict,
        );
        if let Err(e) = self.history.append(&record) {
            tracing::error!(error = %e, "Failed to append validation history");
        }
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("collector", &self.collector)
            .field("discoverer", &self.discoverer)
            .field("evaluator", &self.evaluator)
            .field("max_search_results", &self.max_search_results)
            .finish()
    }
}

fn csv_notice(detail: &dyn std::fmt::Display) -> String {
    format!("Failed to read CSV: {}", detail)
}

/// Builder for ValidationPipeline.
///
/// Unset parts are derived from the configuration and credentials: an HTTP
/// page fetcher, the OpenAI provider when a model key is present, and a CSV
/// history log at `config.history_path`.
pub struct ValidationPipelineBuilder {
    config: RuntimeConfig,
    credentials: Credentials,
    fetcher: Option<Arc<dyn PageFetcher>>,
    provider: Option<Arc<dyn LlmProvider>>,
    history: Option<Arc<dyn HistorySink>>,
}

impl ValidationPipelineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            credentials: Credentials::default(),
            fetcher: None,
            provider: None,
            history: None,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the API credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Use a custom page fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a custom LLM provider instead of the credential-derived one.
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use a custom history sink.
    pub fn history(mut self, history: Arc<dyn HistorySink>) -> Self {
        self.history = Some(history);
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<ValidationPipeline, PipelineError> {
        let config = self.config;
        let (model_credential, search_credential) = self.credentials.into_parts();

        let fetcher: Arc<dyn PageFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpPageFetcher::new(&config.fetch)?),
        };

        let evaluator = match self.provider {
            Some(provider) => ModelEvaluator::new(
                provider,
                CompletionConfig {
                    model: config.model.model.clone(),
                    temperature: config.model.temperature,
                    timeout: config.model.timeout,
                },
            ),
            None => ModelEvaluator::from_config(model_credential, &config.model)?,
        };

        let history: Arc<dyn HistorySink> = match self.history {
            Some(history) => history,
            None => Arc::new(CsvHistoryLog::new(config.history_path.clone())),
        };

        tracing::debug!(
            model = evaluator.is_configured(),
            search = search_credential.is_some(),
            "Pipeline configured"
        );

        Ok(ValidationPipeline {
            collector: EvidenceCollector::new(fetcher).with_max_urls(config.max_urls),
            discoverer: LinkDiscoverer::new(search_credential, config.search.clone())?,
            evaluator,
            fallback: FallbackEvaluator::new(),
            history,
            max_search_results: config.search.max_results,
        })
    }
}

impl Default for ValidationPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
