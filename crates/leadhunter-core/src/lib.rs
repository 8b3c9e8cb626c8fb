//! # leadhunter-core
//!
//! Deterministic building blocks for lead validation.
//!
//! This crate turns fetched pages into evidence, evidence into a model
//! prompt, model replies into verdict rows, and, when no model is
//! available, evidence into keyword-based verdicts.
//!
//! ## Key Guarantees
//!
//! 1. **No I/O**: nothing here touches the network or the filesystem
//! 2. **Total**: rewriting, prompt rendering and fallback evaluation never fail
//! 3. **Bounded**: URL sets, titles and page text are clipped to fixed sizes
//!
//! ## Example
//!
//! ```rust
//! use leadhunter_core::{Category, EvidenceRecord, FallbackEvaluator, Found, Language};
//!
//! let evidence = vec![EvidenceRecord::page("https://a.test", "Shop", "Add to cart")];
//! let rows = FallbackEvaluator::new().evaluate(Category::Product, &evidence, "", Language::En);
//!
//! assert_eq!(rows[0].found, Found::Yes);
//! ```

pub mod extract;
pub mod fallback;
pub mod history;
pub mod prompt;
pub mod query;
pub mod reply;
pub mod types;
pub mod urls;

// Re-export main types at crate root
pub use extract::{extract_page, extract_page_with_limits, ExtractedPage};
pub use fallback::FallbackEvaluator;
pub use history::{HistoryError, HistoryRecord, HistorySink, HISTORY_HEADERS};
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
pub use query::{rewrite_query, rewrite_query_for_tag};
pub use reply::parse_reply;
pub use types::{
    truncate_chars, Availability, Category, EvidenceRecord, Found, Language, ValidationRequest,
    Verdict, VerdictRow, MAX_TEXT_CHARS, MAX_TITLE_CHARS, MAX_URLS,
};
pub use urls::{dedup_and_cap, parse_manual, parse_url_table, UrlListError};

/// Message returned when there is neither a model nor any evidence.
pub const DEMO_MESSAGE: &str = "Demo mode: no AI and no URLs to validate.\n\
                                Provide URLs, upload a CSV, or enable auto-search.";
