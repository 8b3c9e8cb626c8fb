//! Core types for lead validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of URLs evaluated in one validation.
pub const MAX_URLS: usize = 12;

/// Maximum characters kept from a page title.
pub const MAX_TITLE_CHARS: usize = 180;

/// Maximum characters kept from a page's extracted text.
pub const MAX_TEXT_CHARS: usize = 8000;

/// Language the model is asked to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
    Fr,
}

impl Language {
    /// Resolve a language tag. Unknown tags fall back to Portuguese.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "es" => Language::Es,
            "fr" => Language::Fr,
            _ => Language::Pt,
        }
    }

    /// Short tag as written in the history log.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// Name of the language in itself, used in prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Pt => "Português",
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
        }
    }
}

/// What kind of lead signal a validation looks for.
///
/// The category biases both the search query rewrite and the keyword
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Open job positions
    Jobs,
    /// Funding, expansion, hiring surges
    Growth,
    /// Product or brand for sale
    Product,
    /// Competitor launches and campaigns
    Competitor,
    /// Anything else, driven by the free-text context
    #[default]
    Freeform,
}

impl Category {
    /// All categories, in form order.
    pub const ALL: [Category; 5] = [
        Category::Jobs,
        Category::Growth,
        Category::Product,
        Category::Competitor,
        Category::Freeform,
    ];

    /// Resolve a category tag.
    ///
    /// Accepts the English tags and the Portuguese form values
    /// (`vagas`, `crescimento`, `produto`, `concorrente`, `livre`).
    /// Anything unrecognized is treated as free-form.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "jobs" | "vagas" => Category::Jobs,
            "growth" | "crescimento" => Category::Growth,
            "product" | "produto" => Category::Product,
            "competitor" | "concorrente" => Category::Competitor,
            _ => Category::Freeform,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Jobs => "jobs",
            Category::Growth => "growth",
            Category::Product => "product",
            Category::Competitor => "competitor",
            Category::Freeform => "freeform",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether the looked-for signal was found on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Found {
    Yes,
    No,
    /// The page could not be evaluated (e.g. fetch failed)
    NotApplicable,
    /// Weak signal: nothing to assert either way
    Maybe,
}

impl Found {
    /// Parse a found-label as written by a model.
    ///
    /// Models answer in the requested language, so Portuguese, Spanish and
    /// French labels are recognized. Unrecognized labels become `Maybe`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .trim()
            .trim_matches(|c: char| c == '*' || c == '`' || c == '.')
            .to_lowercase();

        match normalized.as_str() {
            "yes" | "sim" | "sí" | "si" | "oui" | "true" => Found::Yes,
            "no" | "não" | "nao" | "non" | "false" => Found::No,
            "n/a" | "na" | "not applicable" | "não se aplica" => Found::NotApplicable,
            _ => Found::Maybe,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Yes => write!(f, "Yes"),
            Found::No => write!(f, "No"),
            Found::NotApplicable => write!(f, "N/A"),
            Found::Maybe => write!(f, "Maybe"),
        }
    }
}

/// Fetched-and-extracted representation of one URL.
///
/// When `ok` is false, `text` holds the failure description instead of
/// page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub url: String,
    pub ok: bool,
    pub title: String,
    pub text: String,
}

impl EvidenceRecord {
    /// Evidence from a successfully fetched page.
    ///
    /// Title and text are clipped to [`MAX_TITLE_CHARS`] and [`MAX_TEXT_CHARS`].
    pub fn page(url: impl Into<String>, title: &str, text: &str) -> Self {
        Self {
            url: url.into(),
            ok: true,
            title: truncate_chars(title.trim(), MAX_TITLE_CHARS).to_string(),
            text: truncate_chars(text, MAX_TEXT_CHARS).to_string(),
        }
    }

    /// Evidence for a page that could not be fetched.
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ok: false,
            title: String::new(),
            text: error.into(),
        }
    }
}

/// One categorized finding for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRow {
    pub url: String,
    pub found: Found,
    /// Short supporting excerpt
    pub evidence: String,
    /// Suggested next step or remark
    pub note: String,
}

impl VerdictRow {
    /// Render as a pipe-delimited line, the same shape the model is asked for.
    pub fn to_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.url, self.found, self.evidence, self.note
        )
    }
}

/// Result of an evaluation: structured rows, or unstructured text when the
/// model reply had no usable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Verdict {
    Rows(Vec<VerdictRow>),
    FreeText(String),
}

impl Verdict {
    pub fn rows(&self) -> Option<&[VerdictRow]> {
        match self {
            Verdict::Rows(rows) => Some(rows),
            Verdict::FreeText(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Verdict::Rows(_) => None,
            Verdict::FreeText(text) => Some(text),
        }
    }

    /// Flatten into the text stored in the history log.
    pub fn to_history_text(&self) -> String {
        match self {
            Verdict::Rows(rows) => rows
                .iter()
                .map(VerdictRow::to_line)
                .collect::<Vec<_>>()
                .join("\n"),
            Verdict::FreeText(text) => text.clone(),
        }
    }
}

/// Outcome of an optional external call.
///
/// A missing credential and a failed call collapse into `Unavailable`: the
/// caller only decides whether to fall back, not why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Availability::Available(value),
            None => Availability::Unavailable,
        }
    }
}

/// One validation invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    language: Language,
    category: Category,
    context: String,
    urls: Vec<String>,
    auto_search_query: String,
}

impl ValidationRequest {
    /// Build a request. The context is trimmed; URLs are deduplicated and
    /// capped at [`MAX_URLS`].
    pub fn new(
        language: Language,
        category: Category,
        context: impl Into<String>,
        urls: Vec<String>,
        auto_search_query: impl Into<String>,
    ) -> Self {
        Self {
            language,
            category,
            context: context.into().trim().to_string(),
            urls: crate::urls::dedup_and_cap(urls, MAX_URLS),
            auto_search_query: auto_search_query.into(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn auto_search_query(&self) -> &str {
        &self.auto_search_query
    }
}

/// Clip `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tags_and_aliases() {
        assert_eq!(Category::from_tag("jobs"), Category::Jobs);
        assert_eq!(Category::from_tag("vagas"), Category::Jobs);
        assert_eq!(Category::from_tag("Crescimento"), Category::Growth);
        assert_eq!(Category::from_tag("produto"), Category::Product);
        assert_eq!(Category::from_tag("concorrente"), Category::Competitor);
        assert_eq!(Category::from_tag("livre"), Category::Freeform);
        assert_eq!(Category::from_tag("something-else"), Category::Freeform);

        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), category);
        }
    }

    #[test]
    fn test_language_fallback() {
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("FR"), Language::Fr);
        assert_eq!(Language::from_tag("de"), Language::Pt);
        assert_eq!(Language::from_tag("").display_name(), "Português");
    }

    #[test]
    fn test_found_labels() {
        assert_eq!(Found::from_label("Sim"), Found::Yes);
        assert_eq!(Found::from_label(" yes "), Found::Yes);
        assert_eq!(Found::from_label("**Não**"), Found::No);
        assert_eq!(Found::from_label("N/A"), Found::NotApplicable);
        assert_eq!(Found::from_label("Talvez"), Found::Maybe);
        assert_eq!(Found::from_label("partially"), Found::Maybe);
        assert_eq!(Found::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("ãéíõú", 2), "ãé");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_page_record_is_clipped() {
        let title = format!("  {}  ", "t".repeat(300));
        let text = "x".repeat(MAX_TEXT_CHARS + 50);
        let record = EvidenceRecord::page("https://a.test", &title, &text);

        assert!(record.ok);
        assert_eq!(record.title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(record.text.chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_request_dedups_and_caps() {
        let urls: Vec<String> = (0..20).map(|i| format!("https://{}.test", i % 15)).collect();
        let request = ValidationRequest::new(Language::En, Category::Jobs, "", urls, "");
        assert_eq!(request.urls().len(), MAX_URLS);
        assert_eq!(request.urls()[0], "https://0.test");
    }

    #[test]
    fn test_request_trims_context() {
        let request =
            ValidationRequest::new(Language::En, Category::Freeform, "  Acme \n", vec![], "");
        assert_eq!(request.context(), "Acme");

        let blank =
            ValidationRequest::new(Language::En, Category::Freeform, "   \n  ", vec![], "");
        assert_eq!(blank.context(), "");
    }

    #[test]
    fn test_verdict_history_text() {
        let verdict = Verdict::Rows(vec![VerdictRow {
            url: "https://a.test".to_string(),
            found: Found::Yes,
            evidence: "Careers".to_string(),
            note: "Local heuristic (demo)".to_string(),
        }]);
        assert_eq!(
            verdict.to_history_text(),
            "https://a.test | Yes | Careers | Local heuristic (demo)"
        );
        assert!(verdict.text().is_none());
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = Verdict::Rows(vec![VerdictRow {
            url: "https://a.test".to_string(),
            found: Found::NotApplicable,
            evidence: "ERROR: Timeout".to_string(),
            note: "Access failed".to_string(),
        }]);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["kind"], "rows");
        assert_eq!(json["value"][0]["found"], "not_applicable");

        let text = serde_json::to_value(Verdict::FreeText("hi".to_string())).unwrap();
        assert_eq!(text, serde_json::json!({"kind": "free_text", "value": "hi"}));
    }
}
