//! Prompt rendering for model-assisted validation.
//!
//! The rendered document is the single user message sent to the model.
//! Rendering is total: every combination of inputs produces a prompt.

use crate::types::{truncate_chars, Category, EvidenceRecord, Language};

/// System instruction sent with every validation prompt.
pub const SYSTEM_PROMPT: &str = "Be objective, evidence-based, and useful for business decisions.";

/// Characters of page text quoted per URL in the prompt.
pub const PROMPT_TEXT_CHARS: usize = 1200;

/// Marker used when no evidence was collected.
pub const NO_URLS_MARKER: &str = "No URLs provided.";

/// Goal used for free-form and unrecognized categories.
const GENERIC_GOAL: &str = "Carry out the requested validation with evidence.";

/// Goal sentence for a category.
pub fn goal_for(category: Category) -> &'static str {
    match category {
        Category::Jobs => "Say whether there are open positions (Yes/No) and cite short evidence.",
        Category::Growth => {
            "Point out growth signals (funding, headcount, expansion, new openings) with evidence."
        }
        Category::Product => {
            "Check whether the brand/product is for sale (Yes/No), where, and cite evidence."
        }
        Category::Competitor => {
            "Check competitor activity (launches, campaigns, announcements) with evidence."
        }
        Category::Freeform => GENERIC_GOAL,
    }
}

/// Builds the instruction document for one validation.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    language: Language,
    category: Category,
    context: &'a str,
    evidence: &'a [EvidenceRecord],
}

impl<'a> PromptBuilder<'a> {
    pub fn new(
        language: Language,
        category: Category,
        context: &'a str,
        evidence: &'a [EvidenceRecord],
    ) -> Self {
        Self {
            language,
            category,
            context,
            evidence,
        }
    }

    /// Render the prompt.
    pub fn build(&self) -> String {
        let closing = if self.evidence.is_empty() {
            "If there are no URLs, deliver a structured analysis with practical steps."
        } else {
            "Deliver a TABLE with the columns:\n\
             URL | Found (Yes/No/N/A) | Evidence (short) | Notes (next step)"
        };

        format!(
            "Respond in {language}.\n\n\
             You are a validation analyst. Goal: {goal}\n\
             Context:\n\
             {context}\n\n\
             Evidence per URL:\n\
             {evidence}\n\n\
             {closing}\n\
             If the evidence is weak, say how to strengthen it.\n",
            language = self.language.display_name(),
            goal = goal_for(self.category),
            context = self.context,
            evidence = self.render_evidence(),
            closing = closing,
        )
    }

    fn render_evidence(&self) -> String {
        if self.evidence.is_empty() {
            return NO_URLS_MARKER.to_string();
        }

        self.evidence
            .iter()
            .map(|record| {
                format!(
                    "- URL: {}\n  TITLE: {}\n  TEXT: {}",
                    record.url,
                    record.title,
                    truncate_chars(&record.text, PROMPT_TEXT_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, text: &str) -> EvidenceRecord {
        EvidenceRecord::page(url, "Acme", text)
    }

    #[test]
    fn test_prompt_with_evidence_demands_table() {
        let evidence = vec![record("https://acme.test/careers", "We are hiring")];
        let prompt =
            PromptBuilder::new(Language::En, Category::Jobs, "Acme Corp", &evidence).build();

        assert!(prompt.starts_with("Respond in English."));
        assert!(prompt.contains(goal_for(Category::Jobs)));
        assert!(prompt.contains("Context:\nAcme Corp\n"));
        assert!(prompt
            .contains("- URL: https://acme.test/careers\n  TITLE: Acme\n  TEXT: We are hiring"));
        assert!(prompt.contains("URL | Found (Yes/No/N/A) | Evidence (short) | Notes (next step)"));
        assert!(prompt.contains("If the evidence is weak"));
        assert!(!prompt.contains(NO_URLS_MARKER));
    }

    #[test]
    fn test_prompt_without_evidence() {
        let prompt = PromptBuilder::new(Language::Pt, Category::Growth, "", &[]).build();

        assert!(prompt.starts_with("Respond in Português."));
        assert!(prompt.contains(NO_URLS_MARKER));
        assert!(prompt.contains("structured analysis with practical steps"));
        assert!(!prompt.contains("TABLE"));
        assert!(prompt.contains("If the evidence is weak"));
    }

    #[test]
    fn test_evidence_text_truncated() {
        let evidence = vec![record("https://a.test", &"x".repeat(5000))];
        let prompt = PromptBuilder::new(Language::En, Category::Product, "", &evidence).build();

        let quoted = "x".repeat(PROMPT_TEXT_CHARS);
        assert!(prompt.contains(&format!("TEXT: {}\n", quoted)));
        assert!(!prompt.contains(&"x".repeat(PROMPT_TEXT_CHARS + 1)));
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let evidence = vec![record("https://a.test", "one"), record("https://b.test", "two")];
        let prompt = PromptBuilder::new(Language::Es, Category::Competitor, "", &evidence).build();
        assert!(prompt.contains("TEXT: one\n\n- URL: https://b.test"));
    }

    #[test]
    fn test_failed_records_are_rendered() {
        let evidence = vec![EvidenceRecord::failure("https://down.test", "ERROR: Timeout: 12s")];
        let prompt = PromptBuilder::new(Language::Fr, Category::Freeform, "ctx", &evidence).build();
        assert!(prompt.contains("TEXT: ERROR: Timeout: 12s"));
        assert!(prompt.contains(GENERIC_GOAL));
    }

    #[test]
    fn test_every_category_has_goal() {
        for category in Category::ALL {
            assert!(!goal_for(category).is_empty());
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let evidence = vec![record("https://a.test", "text")];
        let builder = PromptBuilder::new(Language::En, Category::Jobs, "ctx", &evidence);
        assert_eq!(builder.build(), builder.build());
    }
}
