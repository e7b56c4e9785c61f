//! Source-based filtering and source statistics.

use crate::config::AllowList;
use crate::models::NewsItem;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

/// Keep items whose lower-cased source contains an allowed substring.
///
/// Matching is literal substring, so `"cnbc"` keeps `"CNBC International"`.
///
/// # Arguments
///
/// * `items` - Fetched articles
/// * `allowed` - Lower-cased publisher substrings
///
/// # Returns
///
/// The matching items, cloned whole and in their original relative order.
/// Items with a missing or empty source are always dropped. Filtering the
/// result again returns it unchanged.
///
/// # Examples
///
/// ```ignore
/// let kept = filter_by_sources(&feed.items, &AllowList::new(["cnbc"]));
/// ```
pub fn filter_by_sources(items: &[NewsItem], allowed: &AllowList) -> Vec<NewsItem> {
    let kept: Vec<NewsItem> = items
        .iter()
        .filter(|item| {
            item.normalized_source()
                .is_some_and(|source| allowed.matches(&source))
        })
        .cloned()
        .collect();
    debug!(input = items.len(), kept = kept.len(), "Filtered by source");
    kept
}

/// The `n` most frequent raw source names with their counts.
///
/// # Arguments
///
/// * `items` - Articles to count; items without a `source` string are skipped
/// * `n` - Maximum number of entries returned
///
/// # Returns
///
/// `(source, count)` pairs, most frequent first. Counts are case-sensitive and
/// include empty names; ties keep the order in which sources first appear.
///
/// # Examples
///
/// ```ignore
/// for (source, count) in most_common_sources(&feed.items, 10) {
///     println!("- {source}: {count} articles");
/// }
/// ```
pub fn most_common_sources(items: &[NewsItem], n: usize) -> Vec<(String, usize)> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for source in items.iter().filter_map(NewsItem::source) {
        let idx = *first_seen.entry(source).or_insert_with(|| {
            counts.push((source, 0));
            counts.len() - 1
        });
        counts[idx].1 += 1;
    }

    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(n)
        .map(|(source, count)| (source.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn items(values: Vec<Value>) -> Vec<NewsItem> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn test_filter_keeps_only_allowed_sources() {
        let input = items(vec![
            json!({"source": "CNBC Europe", "title": "A"}),
            json!({"source": "Random Blog", "title": "B"}),
            json!({"source": "", "title": "C"}),
        ]);
        let out = filter_by_sources(&input, &AllowList::new(["cnbc"]));
        assert_eq!(out, items(vec![json!({"source": "CNBC Europe", "title": "A"})]));
    }

    #[test]
    fn test_filter_preserves_order_and_content() {
        let input = items(vec![
            json!({"source": "Business Insider", "title": "1", "topics": ["earnings"]}),
            json!({"source": "Zacks", "title": "2"}),
            json!({"source": "Financial Times", "title": "3"}),
            json!({"title": "4"}),
            json!({"source": "The Economic Times", "title": "5"}),
            json!({"source": null, "title": "6"}),
        ]);
        let out = filter_by_sources(&input, &AllowList::default());
        let titles: Vec<_> = out.iter().filter_map(NewsItem::title).collect();
        assert_eq!(titles, vec!["1", "3", "5"]);
        assert_eq!(out[0], input[0]);
        for item in &out {
            let source = item.normalized_source().unwrap();
            assert!(AllowList::default().matches(&source));
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let input = items(vec![
            json!({"source": "CNBC"}),
            json!({"source": "Benzinga"}),
            json!({"source": "Business Insider"}),
        ]);
        let allow = AllowList::default();
        let once = filter_by_sources(&input, &allow);
        let twice = filter_by_sources(&once, &allow);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_by_sources(&[], &AllowList::default()).is_empty());
    }

    #[test]
    fn test_most_common_sources_orders_by_count_then_first_seen() {
        let input = items(vec![
            json!({"source": "Zacks"}),
            json!({"source": "Benzinga"}),
            json!({"source": "Benzinga"}),
            json!({"source": "Motley Fool"}),
            json!({"source": "Zacks"}),
            json!({"source": "benzinga"}),
            json!({"title": "no source"}),
        ]);
        let top = most_common_sources(&input, 10);
        assert_eq!(
            top,
            vec![
                ("Zacks".to_string(), 2),
                ("Benzinga".to_string(), 2),
                ("Motley Fool".to_string(), 1),
                ("benzinga".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_most_common_sources_caps_at_n() {
        let input: Vec<NewsItem> = (0..15)
            .map(|i| serde_json::from_value(json!({"source": format!("S{i}")})).unwrap())
            .collect();
        assert_eq!(most_common_sources(&input, 10).len(), 10);
    }
}
