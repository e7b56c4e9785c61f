//! Small string helpers shared by the fetcher, listing and save step.

use crate::models::{COMPACT_DATE_FORMAT, SearchParams};
use std::error::Error;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a char boundary) with an
/// ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Render an error and every `source()` below it on one line.
///
/// # Arguments
///
/// * `e` - The outermost error
///
/// # Returns
///
/// Each message in the chain, outermost first, joined with `": "`.
///
/// # Examples
///
/// ```ignore
/// // "failed to write out.json: No such file or directory (os error 2)"
/// writeln!(out, "Error saving to file: {}", error_chain(&e))?;
/// ```
pub fn error_chain(e: &dyn Error) -> String {
    let mut line = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = cause.source();
    }
    line
}

/// First `max` characters of `s` (characters, not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Default save file name, e.g. `meta_aapl_news_20250128_20250228.json`.
///
/// Tickers are lower-cased and commas become underscores.
pub fn default_save_filename(params: &SearchParams) -> String {
    format!(
        "{}_news_{}_{}.json",
        params.tickers.to_lowercase().replace(',', "_"),
        params.window.from.format(COMPACT_DATE_FORMAT),
        params.window.to.format(COMPACT_DATE_FORMAT),
    )
}
