//! Keyword fallback evaluator.
//!
//! Used when no model is configured or the model call fails. It has no
//! external dependency and cannot fail.

use crate::types::{truncate_chars, Category, EvidenceRecord, Found, Language, VerdictRow};

/// Characters of error text kept for failed fetches.
const ERROR_EVIDENCE_CHARS: usize = 180;

/// Characters of page text used as evidence when the page has no title.
const TEXT_EVIDENCE_CHARS: usize = 140;

pub const NOTE_ACCESS_FAILED: &str = "Access failed";
pub const NOTE_HEURISTIC: &str = "Local heuristic (demo)";

const JOB_KEYWORDS: &[&str] = &[
    "job",
    "jobs",
    "careers",
    "we are hiring",
    "hiring",
    "open roles",
    "apply",
    "lever",
    "greenhouse",
    "workable",
    "gupy",
];

const GROWTH_KEYWORDS: &[&str] = &[
    "funding",
    "series a",
    "series b",
    "investment",
    "expansion",
    "opens new office",
    "growth",
    "hiring surge",
];

const PRODUCT_KEYWORDS: &[&str] = &[
    "buy",
    "price",
    "add to cart",
    "in stock",
    "sold by",
    "shipping",
    "marketplace",
];

const COMPETITOR_KEYWORDS: &[&str] = &[
    "launch",
    "release",
    "campaign",
    "announcement",
    "changelog",
    "new version",
];

/// Keyword list for a category, if it has one.
pub fn keywords_for(category: Category) -> Option<&'static [&'static str]> {
    match category {
        Category::Jobs => Some(JOB_KEYWORDS),
        Category::Growth => Some(GROWTH_KEYWORDS),
        Category::Product => Some(PRODUCT_KEYWORDS),
        Category::Competitor => Some(COMPETITOR_KEYWORDS),
        Category::Freeform => None,
    }
}

/// Deterministic keyword evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackEvaluator;

impl FallbackEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Produce one row per evidence record, in order.
    ///
    /// `language` is accepted for parity with the model path; rows are not
    /// localized.
    pub fn evaluate(
        &self,
        category: Category,
        evidence: &[EvidenceRecord],
        context: &str,
        _language: Language,
    ) -> Vec<VerdictRow> {
        evidence
            .iter()
            .map(|record| self.evaluate_record(category, record, context))
            .collect()
    }

    fn evaluate_record(
        &self,
        category: Category,
        record: &EvidenceRecord,
        context: &str,
    ) -> VerdictRow {
        if !record.ok {
            return VerdictRow {
                url: record.url.clone(),
                found: Found::NotApplicable,
                evidence: truncate_chars(&record.text, ERROR_EVIDENCE_CHARS).to_string(),
                note: NOTE_ACCESS_FAILED.to_string(),
            };
        }

        let found = match keywords_for(category) {
            Some(keywords) => {
                let text = record.text.to_lowercase();
                if keywords.iter().any(|keyword| text.contains(keyword)) {
                    Found::Yes
                } else {
                    Found::No
                }
            }
            // Without keywords the only basis is whether the user gave context.
            None if !context.is_empty() => Found::Yes,
            None => Found::Maybe,
        };

        let evidence = if record.title.is_empty() {
            truncate_chars(&record.text, TEXT_EVIDENCE_CHARS).to_string()
        } else {
            record.title.clone()
        };

        VerdictRow {
            url: record.url.clone(),
            found,
            evidence,
            note: NOTE_HEURISTIC.to_string(),
        }
    }
}
