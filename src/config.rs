//! Runtime configuration.
//!
//! [`NewsConfig`] is built once in `main` from the parsed [`Cli`](crate::cli::Cli)
//! and handed to the fetcher and filter. Nothing here is global.

use crate::error::ConfigError;
use url::Url;

/// Alpha Vantage query endpoint.
pub const ALPHA_VANTAGE_ENDPOINT: &str = "https://www.alphavantage.co/query";

/// Maximum number of items the API returns per call.
pub const MAX_LIMIT: i64 = 1000;

/// Publisher substrings kept by the filter.
pub const ALLOWED_SOURCES: [&str; 4] = [
    "financial times",
    "economic times",
    "business insider",
    "cnbc",
];

pub const DEFAULT_TICKERS: &str = "META";
pub const DEFAULT_FROM: &str = "20250128";
pub const DEFAULT_TO: &str = "20250228";

/// Lower-case publisher substrings. A source is allowed when its lower-cased
/// name contains any entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList(Vec<String>);

impl AllowList {
    /// Build from arbitrary entries; entries are lower-cased.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// True if `source_lower` contains any allowed substring.
    pub fn matches(&self, source_lower: &str) -> bool {
        self.0.iter().any(|allowed| source_lower.contains(allowed.as_str()))
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(ALLOWED_SOURCES)
    }
}

/// Immutable settings for a run.
#[derive(Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub allowed_sources: AllowList,
}

impl NewsConfig {
    pub fn new(api_key: impl Into<String>, endpoint: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::Endpoint {
            url: endpoint.to_string(),
            source,
        })?;
        Ok(Self {
            api_key,
            endpoint,
            allowed_sources: AllowList::default(),
        })
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("allowed_sources", &self.allowed_sources)
            .finish()
    }
}
