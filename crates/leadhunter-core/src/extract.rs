//! HTML to evidence text.
//!
//! Extraction is deliberately flat: every visible text node, trimmed and
//! joined with single spaces, then clipped. It is not meant to be a
//! readability algorithm, only a bounded, predictable rendering for prompts
//! and keyword checks.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::types::{truncate_chars, MAX_TEXT_CHARS, MAX_TITLE_CHARS};

/// Elements whose text content is never rendered.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

lazy_static! {
    static ref TITLE_SELECTOR: Selector = Selector::parse("title").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Title and flattened text of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
}

/// Extract title and visible text from an HTML document.
pub fn extract_page(html: &str) -> ExtractedPage {
    extract_page_with_limits(html, MAX_TITLE_CHARS, MAX_TEXT_CHARS)
}

/// [`extract_page`] with explicit title and text limits, in characters.
pub fn extract_page_with_limits(
    html: &str,
    max_title_chars: usize,
    max_text_chars: usize,
) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    let title = truncate_chars(title.trim(), max_title_chars).to_string();

    let mut pieces = Vec::new();
    collect_visible_text(&document.root_element(), &mut pieces);
    let text = pieces.join(" ");
    let text = truncate_chars(&text, max_text_chars).to_string();

    ExtractedPage { title, text }
}

fn collect_visible_text(element: &ElementRef<'_>, pieces: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let collapsed = WHITESPACE.replace_all(text.trim(), " ");
                if !collapsed.is_empty() {
                    pieces.push(collapsed.into_owned());
                }
            }
            Node::Element(el) => {
                if INVISIBLE_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_visible_text(&child_ref, pieces);
                }
            }
            _ => {}
        }
    }
}
