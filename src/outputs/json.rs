//! JSON file output for filtered articles.
//!
//! The file holds a single array of the article records exactly as the API
//! returned them, indented two spaces. Non-ASCII text is written as-is.

use crate::error::OutputError;
use crate::models::NewsItem;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `articles` to `path`, replacing any existing file.
///
/// The write is not atomic; a failure part-way may leave a truncated file
/// behind.
///
/// # Arguments
///
/// * `articles` - Records to save, written as one JSON array
/// * `path` - Target file; its directory must already exist
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// - [`OutputError::Serialize`] if the records cannot be serialized
/// - [`OutputError::Io`] if the file cannot be written, carrying the path
///
/// # Examples
///
/// ```ignore
/// let count = write_articles(&filtered, "meta_news_20250128_20250228.json").await?;
/// ```
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), count = articles.len()))]
pub async fn write_articles(
    articles: &[NewsItem],
    path: impl AsRef<Path>,
) -> Result<usize, OutputError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(articles)?;

    if let Err(e) = fs::write(path, json).await {
        error!(error = %e, "Failed to write JSON");
        return Err(OutputError::Io {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!("Wrote articles JSON");
    Ok(articles.len())
}
