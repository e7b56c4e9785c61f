//! Data models for news items and query parameters.
//!
//! - [`NewsItem`]: one record of the API's `feed`, kept as a raw JSON object
//! - [`Feed`]: the items of one response plus the distinct sources seen
//! - [`NewsQuery`]: parameters for a single fetch
//! - [`DateWindow`] / [`SearchParams`]: what the operator asked for
//!
//! News items are not projected onto a fixed struct. The API attaches
//! sentiment scores, topics and ticker breakdowns to each item, and all of it
//! is carried through to the saved file untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Compact date format accepted from the operator, e.g. `20250128`.
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Distinct lower-cased publisher names, sorted.
pub type SourceSet = BTreeSet<String>;

/// A single article record exactly as the API returned it.
///
/// Every field is optional. Accessors treat `null` and non-string values the
/// same as a missing field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NewsItem(Map<String, Value>);

impl NewsItem {
    /// Look up a string field by name.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    /// Publisher name, e.g. `"CNBC"` or `"Motley Fool"`.
    pub fn source(&self) -> Option<&str> {
        self.field("source")
    }

    /// Publication timestamp in the API's own format (`20250130T143000`).
    pub fn time_published(&self) -> Option<&str> {
        self.field("time_published")
    }

    pub fn url(&self) -> Option<&str> {
        self.field("url")
    }

    pub fn summary(&self) -> Option<&str> {
        self.field("summary")
    }

    /// Per-ticker sentiment entries; empty when absent or not an array.
    pub fn ticker_sentiment(&self) -> &[Value] {
        self.0
            .get("ticker_sentiment")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lower-cased source, or `None` when the source is missing or empty.
    pub fn normalized_source(&self) -> Option<String> {
        self.source()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// All items from one response together with the sources they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub items: Vec<NewsItem>,
    pub sources: SourceSet,
}

impl Feed {
    /// Build a feed, collecting the lower-cased distinct sources.
    pub fn from_items(items: Vec<NewsItem>) -> Self {
        let sources = items
            .iter()
            .filter_map(NewsItem::normalized_source)
            .collect();
        Self { items, sources }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Parameters for one `NEWS_SENTIMENT` call.
///
/// `limit` is signed so callers can pass anything; the client clamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    /// Comma-separated ticker symbols, e.g. `"META,AAPL"`.
    pub tickers: String,
    /// Inclusive lower bound in `YYYYMMDDTHHMM` form.
    pub time_from: Option<String>,
    /// Inclusive upper bound in `YYYYMMDDTHHMM` form.
    pub time_to: Option<String>,
    pub limit: i64,
}

/// Inclusive calendar window. `from` starts at 00:00, `to` ends at 23:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Parse a bare `YYYYMMDD` date.
    pub fn parse_day(input: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(input.trim(), COMPACT_DATE_FORMAT)
    }

    /// Lower bound in API form, e.g. `20250128T0000`.
    pub fn time_from(&self) -> String {
        format!("{}T0000", self.from.format(COMPACT_DATE_FORMAT))
    }

    /// Upper bound in API form, e.g. `20250228T2359`.
    pub fn time_to(&self) -> String {
        format!("{}T2359", self.to.format(COMPACT_DATE_FORMAT))
    }
}

/// Everything collected from the operator before fetching.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub tickers: String,
    pub window: DateWindow,
}

impl SearchParams {
    /// Turn the operator's choices into a fetch query.
    pub fn to_query(&self, limit: i64) -> NewsQuery {
        NewsQuery {
            tickers: self.tickers.clone(),
            time_from: Some(self.window.time_from()),
            time_to: Some(self.window.time_to()),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> NewsItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_news_item_accessors() {
        let it = item(json!({
            "title": "Meta beats estimates",
            "source": "CNBC",
            "time_published": "20250130T143000",
            "url": "https://cnbc.com/a",
            "summary": "Strong quarter."
        }));
        assert_eq!(it.title(), Some("Meta beats estimates"));
        assert_eq!(it.source(), Some("CNBC"));
        assert_eq!(it.time_published(), Some("20250130T143000"));
        assert_eq!(it.url(), Some("https://cnbc.com/a"));
        assert_eq!(it.summary(), Some("Strong quarter."));
    }

    #[test]
    fn test_news_item_null_and_non_string_fields_read_as_missing() {
        let it = item(json!({"title": null, "source": 42}));
        assert_eq!(it.title(), None);
        assert_eq!(it.source(), None);
        assert_eq!(it.normalized_source(), None);
    }

    #[test]
    fn test_news_item_keeps_unknown_fields() {
        let raw = json!({
            "title": "T",
            "overall_sentiment_score": 0.21,
            "ticker_sentiment": [{"ticker": "META"}]
        });
        let it = item(raw.clone());
        assert_eq!(serde_json::to_value(&it).unwrap(), raw);
    }

    #[test]
    fn test_ticker_sentiment_entries() {
        let it = item(json!({"ticker_sentiment": [{"ticker": "META"}, {"ticker": "AAPL"}]}));
        assert_eq!(it.ticker_sentiment().len(), 2);
        assert!(item(json!({"ticker_sentiment": "n/a"})).ticker_sentiment().is_empty());
        assert!(item(json!({})).ticker_sentiment().is_empty());
    }

    #[test]
    fn test_feed_collects_lowercased_distinct_sources() {
        let feed = Feed::from_items(vec![
            item(json!({"source": "CNBC"})),
            item(json!({"source": "cnbc"})),
            item(json!({"source": "Motley Fool"})),
            item(json!({"source": ""})),
            item(json!({"title": "no source"})),
        ]);
        assert_eq!(feed.len(), 5);
        let sources: Vec<_> = feed.sources.iter().cloned().collect();
        assert_eq!(sources, vec!["cnbc".to_string(), "motley fool".to_string()]);
    }

    #[test]
    fn test_date_window_formats() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        );
        assert_eq!(window.time_from(), "20250128T0000");
        assert_eq!(window.time_to(), "20250228T2359");
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            DateWindow::parse_day(" 20240229 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(DateWindow::parse_day("2025-01-28").is_err());
        assert!(DateWindow::parse_day("20250230").is_err());
    }

    #[test]
    fn test_search_params_to_query() {
        let params = SearchParams {
            tickers: "META,AAPL".to_string(),
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ),
        };
        let q = params.to_query(1000);
        assert_eq!(q.tickers, "META,AAPL");
        assert_eq!(q.time_from.as_deref(), Some("20250101T0000"));
        assert_eq!(q.time_to.as_deref(), Some("20250131T2359"));
        assert_eq!(q.limit, 1000);
    }
}
