//! Per-ticker sentiment roll-up over a fetched feed.
//!
//! Every `NEWS_SENTIMENT` item carries a `ticker_sentiment` array with one
//! entry per ticker the article mentions:
//!
//! ```text
//! {"ticker": "META", "relevance_score": "0.62",
//!  "ticker_sentiment_score": "0.31", "ticker_sentiment_label": "Somewhat-Bullish"}
//! ```
//!
//! Only the entry for the requested ticker counts, and only when its relevance
//! is above [`RELEVANCE_CUTOFF`]. Scores arrive as strings; plain numbers are
//! accepted too.

use crate::models::NewsItem;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Entries at or below this relevance are ignored.
pub const RELEVANCE_CUTOFF: f64 = 0.5;

/// Average scores beyond +/- this value lean bullish or bearish.
pub const LABEL_THRESHOLD: f64 = 0.1;

const MIN_CONFIDENCE: usize = 50;
const MAX_CONFIDENCE: usize = 95;
const CONFIDENCE_PER_ARTICLE: usize = 10;

/// Explanations longer than this fall back to a short canned sentence.
const EXPLANATION_CHARS: usize = 80;

/// Direction of sentiment for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// Classify an average score against [`LABEL_THRESHOLD`].
    pub fn from_score(score: f64) -> Self {
        if score > LABEL_THRESHOLD {
            Self::Bullish
        } else if score < -LABEL_THRESHOLD {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Bucket one of the API's labels (`Bullish`, `Somewhat-Bearish`, ...).
    fn from_api_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("bullish") {
            Self::Bullish
        } else if label.contains("bearish") {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        })
    }
}

/// Aggregate sentiment for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub ticker: String,
    pub label: SentimentLabel,
    /// Mean `ticker_sentiment_score` over relevant entries, `0.0` when none.
    pub average_score: f64,
    /// Percentage, `0` when no entry was relevant, otherwise within 50..=95.
    pub confidence: u8,
    /// Items looked at.
    pub total: usize,
    /// Items whose entry for the ticker passed the relevance cutoff.
    pub relevant: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    /// One sentence describing what drove the label.
    pub fn explanation(&self) -> String {
        if self.relevant == 0 {
            return "No relevant news found for this ticker.".to_string();
        }
        let long = match self.label {
            SentimentLabel::Bullish => format!(
                "{} positive and {} negative news articles drove optimistic sentiment.",
                self.bullish, self.bearish
            ),
            SentimentLabel::Bearish => format!(
                "{} negative and {} positive news articles drove pessimistic sentiment.",
                self.bearish, self.bullish
            ),
            SentimentLabel::Neutral => format!(
                "Mixed news coverage with {} positive, {} negative, and {} neutral articles.",
                self.bullish, self.bearish, self.neutral
            ),
        };
        if long.chars().count() <= EXPLANATION_CHARS {
            return long;
        }
        match self.label {
            SentimentLabel::Bullish => "Positive news coverage outweighs negative sentiment.",
            SentimentLabel::Bearish => "Negative news coverage outweighs positive sentiment.",
            SentimentLabel::Neutral => "Mixed news coverage creates balanced sentiment.",
        }
        .to_string()
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sentiment for {}: {} (confidence {}%)",
            self.ticker, self.label, self.confidence
        )?;
        if self.relevant > 0 {
            writeln!(
                f,
                "Average score {:.3} across {} relevant of {} articles ({} bullish, {} bearish, {} neutral).",
                self.average_score,
                self.relevant,
                self.total,
                self.bullish,
                self.bearish,
                self.neutral
            )?;
        }
        writeln!(f, "{}", self.explanation())
    }
}

/// Roll up the sentiment of `items` toward `ticker`.
///
/// For each item, the `ticker_sentiment` entry whose `ticker` matches
/// (ASCII case-insensitive) is used when its `relevance_score` is above
/// [`RELEVANCE_CUTOFF`]. Entries whose score does not parse are skipped.
///
/// # Arguments
///
/// * `items` - Feed items as returned by the API
/// * `ticker` - Symbol to summarize, e.g. `"META"`
///
/// # Returns
///
/// A [`SentimentSummary`]. The label comes from the average score; confidence
/// is ten points per relevant article, held within 50..=95. With no relevant
/// articles the label is neutral and confidence is `0`.
///
/// # Examples
///
/// ```ignore
/// let summary = summarize(&feed.items, "META");
/// println!("{summary}");
/// ```
pub fn summarize(items: &[NewsItem], ticker: &str) -> SentimentSummary {
    let mut summary = SentimentSummary {
        ticker: ticker.to_string(),
        label: SentimentLabel::Neutral,
        average_score: 0.0,
        confidence: 0,
        total: items.len(),
        relevant: 0,
        bullish: 0,
        bearish: 0,
        neutral: 0,
    };
    let mut score_sum = 0.0;

    for entry in items.iter().filter_map(|item| entry_for(item, ticker)) {
        let relevance = entry.get("relevance_score").and_then(number);
        let score = entry.get("ticker_sentiment_score").and_then(number);
        let (Some(relevance), Some(score)) = (relevance, score) else {
            continue;
        };
        if relevance <= RELEVANCE_CUTOFF {
            continue;
        }

        score_sum += score;
        summary.relevant += 1;
        let label = entry
            .get("ticker_sentiment_label")
            .and_then(Value::as_str)
            .map_or(SentimentLabel::Neutral, SentimentLabel::from_api_label);
        match label {
            SentimentLabel::Bullish => summary.bullish += 1,
            SentimentLabel::Bearish => summary.bearish += 1,
            SentimentLabel::Neutral => summary.neutral += 1,
        }
    }

    if summary.relevant > 0 {
        summary.average_score = score_sum / summary.relevant as f64;
        summary.label = SentimentLabel::from_score(summary.average_score);
        let confidence = summary
            .relevant
            .saturating_mul(CONFIDENCE_PER_ARTICLE)
            .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        summary.confidence = u8::try_from(confidence).unwrap_or(u8::MAX);
    }

    debug!(
        ticker,
        total = summary.total,
        relevant = summary.relevant,
        average = summary.average_score,
        label = %summary.label,
        "Summarized ticker sentiment"
    );
    summary
}

/// The `ticker_sentiment` entry for `ticker`, if the item has one.
fn entry_for<'a>(item: &'a NewsItem, ticker: &str) -> Option<&'a Map<String, Value>> {
    item.ticker_sentiment()
        .iter()
        .filter_map(Value::as_object)
        .find(|entry| {
            entry
                .get("ticker")
                .and_then(Value::as_str)
                .is_some_and(|t| t.eq_ignore_ascii_case(ticker))
        })
}

/// A score given either as a JSON number or as a numeric string.
fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .filter(|n: &f64| n.is_finite())
}
