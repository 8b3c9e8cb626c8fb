//! History records for completed validations.
//!
//! The log itself is owned by the host; this module shapes the record and
//! defines the append contract.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{truncate_chars, Category, Language, Verdict};

/// Column names, in record order.
pub const HISTORY_HEADERS: [&str; 6] =
    ["timestamp", "language", "category", "context", "urls", "result"];

/// Characters of context kept before the ellipsis.
pub const MAX_CONTEXT_CHARS: usize = 200;

/// Characters of result kept before the ellipsis.
pub const MAX_RESULT_CHARS: usize = 2000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors appending to a history log.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to write history: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode history record: {0}")]
    Csv(#[from] csv::Error),
}

/// One line of the validation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub language: String,
    pub category: String,
    pub context: String,
    pub urls: String,
    pub result: String,
}

impl HistoryRecord {
    /// Shape a record, clipping context and result.
    pub fn new(
        at: DateTime<Local>,
        language: Language,
        category: Category,
        context: &str,
        urls: &[String],
        result: &str,
    ) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            language: language.tag().to_string(),
            category: category.tag().to_string(),
            context: clip_with_ellipsis(context, MAX_CONTEXT_CHARS),
            urls: urls.join(";"),
            result: clip_with_ellipsis(result, MAX_RESULT_CHARS),
        }
    }

    /// Shape a record for a verdict, stamped with the current local time.
    pub fn for_verdict(
        language: Language,
        category: Category,
        context: &str,
        urls: &[String],
        verdict: &Verdict,
    ) -> Self {
        Self::new(
            Local::now(),
            language,
            category,
            context,
            urls,
            &verdict.to_history_text(),
        )
    }

    /// Fields in log order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.timestamp.as_str(),
            self.language.as_str(),
            self.category.as_str(),
            self.context.as_str(),
            self.urls.as_str(),
            self.result.as_str(),
        ]
    }
}

/// Append-only sink for history records.
///
/// Implementations must write each record atomically with respect to other
/// appends from the same process.
pub trait HistorySink: Send + Sync {
    fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError>;
}

fn clip_with_ellipsis(text: &str, max_chars: usize) -> String {
    let clipped = truncate_chars(text, max_chars);
    if clipped.len() < text.len() {
        format!("{}...", clipped)
    } else {
        text.to_string()
    }
}
