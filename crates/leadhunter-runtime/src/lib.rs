//! # leadhunter-runtime
//!
//! Network-facing side of LeadHunter: page fetching, search discovery,
//! model evaluation and the history log, wired together by
//! [`ValidationPipeline`].
//!
//! The deterministic pieces (prompt rendering, reply parsing, keyword
//! fallback) live in `leadhunter-core`. This crate decides when to use
//! them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use leadhunter_runtime::{Credentials, RuntimeConfig, ValidationInput, ValidationPipeline};
//! use leadhunter_core::{Category, Language};
//!
//! let pipeline = ValidationPipeline::builder()
//!     .config(RuntimeConfig::default())
//!     .credentials(Credentials::from_env())
//!     .build()?;
//!
//! let input = ValidationInput::new(Language::En, Category::Jobs)
//!     .with_manual_urls("https://acme.test/careers")
//!     .with_context("Is Acme hiring engineers?");
//!
//! let report = pipeline.validate(input).await;
//! ```

pub mod collector;
pub mod config;
pub mod discovery;
pub mod evaluator;
pub mod fetcher;
pub mod history;
pub mod pipeline;
pub mod providers;

pub use collector::EvidenceCollector;
pub use config::{ConfigError, FetchConfig, ModelConfig, RuntimeConfig, SearchConfig};
pub use discovery::{DiscoveryError, LinkDiscoverer};
pub use evaluator::ModelEvaluator;
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher};
pub use history::{CsvHistoryLog, MemoryHistory};
pub use pipeline::{
    EvaluatedBy, PipelineError, UrlTable, ValidationInput, ValidationPipeline,
    ValidationPipelineBuilder, ValidationReport,
};
pub use providers::{
    ApiCredential, ChatMessage, CompletionConfig, CompletionResponse, CredentialSource,
    Credentials, LlmProvider, OpenAiProvider, ProviderError,
};
