//! Console listing of news items.
//!
//! ```text
//! Displaying 2 of 14 articles:
//! --------------------------------------------------------------------------------
//!
//! --- Article 1 ---
//! Title: Meta beats estimates
//! Source: CNBC
//! Date: 20250130T143000
//! URL: https://www.cnbc.com/...
//! Summary: Meta reported fourth-quarter...
//! --------------------------------------------------------------------------------
//! ```

use crate::models::NewsItem;
use crate::utils::truncate_chars;
use std::fmt::Write;

/// Characters of summary shown per article.
pub const SUMMARY_CHARS: usize = 200;

const RULE_WIDTH: usize = 80;
const NOT_AVAILABLE: &str = "N/A";
const NO_SUMMARY: &str = "No summary available.";

/// Render the first `limit` items as numbered blocks.
///
/// # Arguments
///
/// * `items` - Articles to show, in display order
/// * `limit` - Maximum number of blocks; the header still reports the full count
///
/// # Returns
///
/// The listing text, newline-terminated. Missing fields print as `N/A` and the
/// summary is cut to [`SUMMARY_CHARS`] characters. An empty slice renders the
/// single line `No news items to display.`
///
/// # Examples
///
/// ```ignore
/// print!("{}", render_listing(&filtered, 10));
/// ```
pub fn render_listing(items: &[NewsItem], limit: usize) -> String {
    let mut out = String::new();
    if items.is_empty() {
        writeln!(out, "No news items to display.").unwrap();
        return out;
    }

    let rule = "-".repeat(RULE_WIDTH);
    let shown = limit.min(items.len());
    writeln!(out, "\nDisplaying {shown} of {} articles:", items.len()).unwrap();
    writeln!(out, "{rule}").unwrap();

    for (i, item) in items.iter().take(limit).enumerate() {
        let summary = item.summary().unwrap_or(NO_SUMMARY);
        writeln!(
            out,
            "\n--- Article {} ---\n\
             Title: {}\n\
             Source: {}\n\
             Date: {}\n\
             URL: {}\n\
             Summary: {}...\n\
             {rule}",
            i + 1,
            item.title().unwrap_or(NOT_AVAILABLE),
            item.source().unwrap_or(NOT_AVAILABLE),
            item.time_published().unwrap_or(NOT_AVAILABLE),
            item.url().unwrap_or(NOT_AVAILABLE),
            truncate_chars(summary, SUMMARY_CHARS),
        )
        .unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> NewsItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(render_listing(&[], 10), "No news items to display.\n");
    }

    #[test]
    fn test_listing_renders_all_fields() {
        let items = vec![item(json!({
            "title": "Meta beats estimates",
            "source": "CNBC",
            "time_published": "20250130T143000",
            "url": "https://www.cnbc.com/meta",
            "summary": "Strong ad revenue."
        }))];
        let text = render_listing(&items, 10);
        assert!(text.contains("Displaying 1 of 1 articles:"));
        assert!(text.contains("--- Article 1 ---"));
        assert!(text.contains("Title: Meta beats estimates\n"));
        assert!(text.contains("Source: CNBC\n"));
        assert!(text.contains("Date: 20250130T143000\n"));
        assert!(text.contains("URL: https://www.cnbc.com/meta\n"));
        assert!(text.contains("Summary: Strong ad revenue....\n"));
    }

    #[test]
    fn test_listing_exact_layout() {
        let rule = "-".repeat(80);
        let items = vec![item(json!({"title": "A", "source": "CNBC", "summary": "S"}))];
        assert_eq!(
            render_listing(&items, 10),
            format!(
                "\nDisplaying 1 of 1 articles:\n{rule}\n\n--- Article 1 ---\nTitle: A\nSource: CNBC\nDate: N/A\nURL: N/A\nSummary: S...\n{rule}\n"
            )
        );
    }

    #[test]
    fn test_listing_placeholders_for_missing_fields() {
        let text = render_listing(&[item(json!({}))], 10);
        assert!(text.contains("Title: N/A\n"));
        assert!(text.contains("Source: N/A\n"));
        assert!(text.contains("Date: N/A\n"));
        assert!(text.contains("URL: N/A\n"));
        assert!(text.contains("Summary: No summary available....\n"));
    }

    #[test]
    fn test_listing_truncates_summary_to_200_chars() {
        let long = "é".repeat(250);
        let text = render_listing(&[item(json!({"summary": long}))], 10);
        let expected = format!("Summary: {}...\n", "é".repeat(200));
        assert!(text.contains(&expected));
        assert!(!text.contains(&"é".repeat(201)));
    }

    #[test]
    fn test_listing_respects_limit() {
        let items: Vec<NewsItem> = (1..=12)
            .map(|i| item(json!({"title": format!("T{i}")})))
            .collect();
        let text = render_listing(&items, 10);
        assert!(text.contains("Displaying 10 of 12 articles:"));
        assert!(text.contains("--- Article 10 ---"));
        assert!(!text.contains("--- Article 11 ---"));
        assert!(!text.contains("Title: T11"));
    }
}
