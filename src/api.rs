//! Alpha Vantage `NEWS_SENTIMENT` client.
//!
//! One request per call, no retries. Failures are typed as [`FetchError`]
//! inside [`AlphaVantageClient::try_fetch_news`]; the public
//! [`AlphaVantageClient::fetch_news`] logs them, tells the operator, and
//! hands back an empty [`Feed`] so callers treat "nothing found" and "call
//! failed" the same way.
//!
//! # Request
//!
//! ```text
//! GET {endpoint}?function=NEWS_SENTIMENT&tickers=META&limit=1000&apikey=...
//!     [&time_from=20250128T0000][&time_to=20250228T2359]
//! ```

use crate::config::{MAX_LIMIT, NewsConfig};
use crate::error::FetchError;
use crate::models::{Feed, NewsItem, NewsQuery};
use crate::utils::{error_chain, truncate_for_log};
use serde_json::{Map, Value};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Keys Alpha Vantage uses to explain why a body has no `feed`.
const API_MESSAGE_KEYS: [&str; 3] = ["Information", "Note", "Error Message"];

/// Lower-case quota notice; fails the call even when a `feed` is present.
const API_LIMIT_KEY: &str = "information";

/// Thin client over a `reqwest::Client` bound to one [`NewsConfig`].
#[derive(Debug)]
pub struct AlphaVantageClient {
    http: reqwest::Client,
    config: NewsConfig,
}

impl AlphaVantageClient {
    /// Build a client. No request timeout is set.
    pub fn new(config: NewsConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("av_news_filter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Clamp a requested item count into what the API accepts.
    pub fn clamp_limit(limit: i64) -> i64 {
        limit.clamp(1, MAX_LIMIT)
    }

    /// Query string for `query`. Time bounds are left out entirely when unset.
    pub fn query_pairs(&self, query: &NewsQuery) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("function", "NEWS_SENTIMENT".to_string()),
            ("tickers", query.tickers.clone()),
            ("limit", Self::clamp_limit(query.limit).to_string()),
            ("apikey", self.config.api_key.clone()),
        ];
        if let Some(from) = query.time_from.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("time_from", from.to_string()));
        }
        if let Some(to) = query.time_to.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("time_to", to.to_string()));
        }
        pairs
    }

    /// Fetch news, reporting any failure to `out` and returning an empty feed
    /// in its place.
    ///
    /// This is the logging boundary for fetch failures: the error is logged at
    /// `warn`, one line is printed for the operator, and the caller sees the
    /// same thing it would for a period with no news.
    ///
    /// # Arguments
    ///
    /// * `query` - Tickers, optional time bounds and requested limit
    /// * `out` - Where the operator-facing failure line goes
    ///
    /// # Returns
    ///
    /// The fetched [`Feed`], or an empty one if the call failed for any reason.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let feed = client.fetch_news(&params.to_query(1000), &mut io::stdout()).await;
    /// if feed.is_empty() {
    ///     println!("No news articles found for the specified period.");
    /// }
    /// ```
    pub async fn fetch_news<W: Write>(&self, query: &NewsQuery, out: &mut W) -> Feed {
        match self.try_fetch_news(query).await {
            Ok(feed) => feed,
            Err(e) => {
                let detail = error_chain(&e);
                warn!(error = %detail, tickers = %query.tickers, "News fetch failed; continuing with empty feed");
                let line = match &e {
                    FetchError::MissingFeed(message) => format!("Unexpected API response: {message}"),
                    _ => format!("Error fetching news from Alpha Vantage: {detail}"),
                };
                if let Err(write_err) = writeln!(out, "{line}") {
                    warn!(error = %write_err, "Failed to report fetch failure to the operator");
                }
                Feed::default()
            }
        }
    }

    /// Fetch news, surfacing every failure as a [`FetchError`].
    ///
    /// Makes exactly one `GET`; nothing is retried.
    ///
    /// # Arguments
    ///
    /// * `query` - Tickers, optional time bounds and requested limit; the
    ///   limit is clamped with [`Self::clamp_limit`]
    ///
    /// # Returns
    ///
    /// Every item of the response's `feed` array, unmodified, with the set of
    /// lower-cased sources.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on connection, TLS or body-read failure
    /// - [`FetchError::Status`] on a non-success HTTP status
    /// - [`FetchError::Decode`] when the body is not JSON
    /// - [`FetchError::ApiLimit`] when the body carries an `information` notice
    /// - [`FetchError::MissingFeed`] when there is no `feed` key
    /// - [`FetchError::MalformedFeed`] when `feed` is not an array of objects
    #[instrument(level = "info", skip_all, fields(tickers = %query.tickers, limit = query.limit))]
    pub async fn try_fetch_news(&self, query: &NewsQuery) -> Result<Feed, FetchError> {
        let t0 = Instant::now();
        let response = self
            .http
            .get(self.config.endpoint.clone())
            .query(&self.query_pairs(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received news response");

        let items = parse_feed(&body)?;
        let feed = Feed::from_items(items);
        info!(
            items = feed.len(),
            sources = feed.sources.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched news feed"
        );
        Ok(feed)
    }
}

/// Pull the `feed` array out of a response body.
pub fn parse_feed(body: &str) -> Result<Vec<NewsItem>, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(FetchError::Decode)?;
    let mut map = match value {
        Value::Object(map) => map,
        _ => return Err(FetchError::MissingFeed(truncate_for_log(body, 300))),
    };
    if let Some(notice) = map.get(API_LIMIT_KEY).and_then(Value::as_str) {
        return Err(FetchError::ApiLimit(notice.to_string()));
    }
    match map.remove("feed") {
        Some(feed) => serde_json::from_value(feed).map_err(FetchError::MalformedFeed),
        None => Err(FetchError::MissingFeed(describe_api_message(&map, body))),
    }
}

/// Prefer the API's own explanation (rate limit notes, bad key) over the raw body.
fn describe_api_message(map: &Map<String, Value>, body: &str) -> String {
    API_MESSAGE_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| truncate_for_log(body, 300))
}
