//! Parsing of model replies into verdict rows.
//!
//! A reply line is treated as a table row when it mentions a URL (`http`)
//! and splits on `|` into at least four fields. The first four fields map
//! to url, found, evidence and note. Lines that merely look like rows (a
//! pipe-delimited code sample with a link, say) are accepted as rows too.
//!
//! Markdown table borders are stripped first, so `| url | Yes | … |` maps
//! the URL into the first field instead of an empty cell.

use crate::types::{Found, Verdict, VerdictRow};

/// Substring that marks a line as referring to a URL.
const URL_MARKER: &str = "http";

/// Minimum number of fields for a line to count as a row.
const MIN_FIELDS: usize = 4;

/// Parse a single reply line into a row, if it qualifies.
pub fn parse_row(line: &str) -> Option<VerdictRow> {
    if !line.contains(URL_MARKER) || !line.contains('|') {
        return None;
    }

    let body = strip_table_border(line.trim());
    let fields: Vec<&str> = body.split('|').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(VerdictRow {
        url: fields[0].to_string(),
        found: Found::from_label(fields[1]),
        evidence: fields[2].to_string(),
        note: fields[3].to_string(),
    })
}

/// Parse a full reply.
///
/// Returns `Rows` when at least one line qualifies, otherwise the reply
/// unchanged as `FreeText`.
pub fn parse_reply(reply: &str) -> Verdict {
    let rows: Vec<VerdictRow> = reply.lines().filter_map(parse_row).collect();

    if rows.is_empty() {
        Verdict::FreeText(reply.to_string())
    } else {
        Verdict::Rows(rows)
    }
}

fn strip_table_border(line: &str) -> &str {
    let line = line.strip_prefix('|').unwrap_or(line);
    line.strip_suffix('|').unwrap_or(line)
}
