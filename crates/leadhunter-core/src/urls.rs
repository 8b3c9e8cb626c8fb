//! URL list intake: manual lists, uploaded tables, dedup and cap.

use std::collections::HashSet;
use thiserror::Error;

/// Column holding URLs in an uploaded table.
pub const URL_COLUMN: &str = "url";

/// Errors reading an uploaded URL table.
#[derive(Error, Debug)]
pub enum UrlListError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

/// Split a newline-delimited URL list, trimming entries and skipping blanks.
pub fn parse_manual(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read URLs from the `url` column of a CSV table with a header row.
///
/// Bytes are decoded as UTF-8 lossily. Rows with a blank `url` are skipped.
/// A table without a `url` column yields no URLs rather than an error.
pub fn parse_url_table(data: &[u8]) -> Result<Vec<String>, UrlListError> {
    let data = String::from_utf8_lossy(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim() == URL_COLUMN);

    let Some(column) = column else {
        tracing::debug!("URL table has no '{}' column", URL_COLUMN);
        return Ok(Vec::new());
    };

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(url) = record.get(column).map(str::trim) {
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }

    Ok(urls)
}

/// Remove duplicates keeping the first occurrence, then keep at most `max`.
pub fn dedup_and_cap<I>(urls: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_manual_skips_blank_lines() {
        let urls = parse_manual("  https://a.test  \n\n\t\nhttps://b.test\r\n");
        assert_eq!(urls, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_parse_url_table() {
        let data = "name,url\nAcme,https://acme.test\nBlank,\nBeta, https://beta.test \n";
        let urls = parse_url_table(data.as_bytes()).unwrap();
        assert_eq!(urls, vec!["https://acme.test", "https://beta.test"]);
    }

    #[test]
    fn test_parse_url_table_without_url_column() {
        let urls = parse_url_table(b"name,site\nAcme,https://acme.test\n").unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_parse_url_table_short_rows() {
        let urls = parse_url_table(b"name,url\nAcme\nBeta,https://beta.test\n").unwrap();
        assert_eq!(urls, vec!["https://beta.test"]);
    }

    #[test]
    fn test_parse_url_table_lossy_utf8() {
        let mut data = b"url\nhttps://a.test/caf".to_vec();
        data.extend_from_slice(&[0xff, b'\n']);
        let urls = parse_url_table(&data).unwrap();
        assert_eq!(urls, vec!["https://a.test/caf\u{fffd}"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let urls = vec!["b", "a", "b", "c", "a"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(dedup_and_cap(urls, 12), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dedup_caps_after_removing_duplicates() {
        let urls = (0..30).map(|i| format!("u{}", i / 2)).collect::<Vec<_>>();
        let result = dedup_and_cap(urls, 12);
        assert_eq!(result.len(), 12);
        assert_eq!(result[11], "u11");
    }

    proptest! {
        #[test]
        fn prop_dedup_is_ordered_unique_and_bounded(
            urls in proptest::collection::vec("[a-e]{1,2}", 0..60)
        ) {
            let result = dedup_and_cap(urls.clone(), 12);

            prop_assert!(result.len() <= 12);

            let unique: HashSet<_> = result.iter().collect();
            prop_assert_eq!(unique.len(), result.len());

            // Same order as the first occurrences in the input.
            let mut expected = Vec::new();
            for url in &urls {
                if !expected.contains(url) {
                    expected.push(url.clone());
                }
            }
            expected.truncate(12);
            prop_assert_eq!(result, expected);
        }
    }
}
