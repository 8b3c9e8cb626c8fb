//! Category-biased search query rewriting.
//!
//! The rewrite is a pure string transformation: same query and category,
//! same output. Free-form queries pass through untouched.

use crate::types::Category;

/// Site restrictions covering the major job boards.
const JOB_BOARDS: &str = "site:linkedin.com/jobs OR site:greenhouse.io OR site:lever.co \
     OR site:workable.com OR site:boards.greenhouse.io";

/// Funding, expansion and hiring-surge phrases.
const GROWTH_SIGNALS: &str = "(funding OR investment OR 'series a' OR 'opens new office' \
     OR expansion OR 'hiring surge')";

/// Site restrictions covering the major marketplaces.
const MARKETPLACES: &str =
    "site:amazon.com OR site:ebay.com OR site:alibaba.com OR site:walmart.com";

/// Announcement, launch and campaign phrases.
const COMPETITOR_SIGNALS: &str =
    "(press release OR launch OR campaign OR announcement OR roadmap OR changelog)";

/// Rewrite `query` into a search expression biased toward `category`.
pub fn rewrite_query(query: &str, category: Category) -> String {
    let suffix = match category {
        Category::Jobs => JOB_BOARDS,
        Category::Growth => GROWTH_SIGNALS,
        Category::Product => MARKETPLACES,
        Category::Competitor => COMPETITOR_SIGNALS,
        Category::Freeform => return query.to_string(),
    };

    format!("({}) {}", query, suffix)
}

/// Rewrite using a raw category tag. Unrecognized tags pass the query through.
pub fn rewrite_query_for_tag(query: &str, tag: &str) -> String {
    rewrite_query(query, Category::from_tag(tag))
}
