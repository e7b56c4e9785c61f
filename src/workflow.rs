//! The end-to-end run: collect parameters, fetch, report, filter, show, save.
//!
//! Steps run strictly in order with no retries:
//!
//! 1. **Collect** tickers and date window from the operator (or defaults)
//! 2. **Fetch** one feed; an empty feed ends the run
//! 3. **Report** how many articles and which sources came back, and the
//!    sentiment toward each requested ticker
//! 4. **Filter** to the allow-listed publishers
//! 5. **Show** the kept articles and offer to save them, or, when nothing
//!    survived the filter, list the most common sources instead

use crate::api::AlphaVantageClient;
use crate::config::AllowList;
use crate::filter::{filter_by_sources, most_common_sources};
use crate::models::{COMPACT_DATE_FORMAT, DateWindow, NewsItem, SearchParams};
use crate::outputs::{json, listing};
use crate::prompt::{LineSource, PromptInput, ask};
use crate::sentiment;
use crate::utils::{default_save_filename, error_chain};
use chrono::NaiveDate;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// How many sources the "most common" diagnostic lists.
const TOP_SOURCES: usize = 10;

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Values used when the operator gives no answer.
    pub defaults: SearchParams,
    /// Requested item count, clamped by the client.
    pub limit: i64,
    /// How many filtered articles to print.
    pub display_limit: usize,
    /// Ask questions on the terminal.
    pub interactive: bool,
    /// Save here without asking.
    pub output: Option<PathBuf>,
}

/// Where a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ctrl-C while the request was in flight.
    Interrupted,
    /// The feed came back empty, or the fetch failed.
    NoArticles,
    /// Articles came back but none from an allowed publisher.
    NoneFromSources,
    /// Allowed articles were listed; `saved` names the file if one was written.
    Listed { count: usize, saved: Option<PathBuf> },
}

/// One configured run over a client and allow-list.
#[derive(Debug)]
pub struct Workflow<'a> {
    client: &'a AlphaVantageClient,
    allowed: &'a AllowList,
    options: RunOptions,
}

impl<'a> Workflow<'a> {
    pub fn new(client: &'a AlphaVantageClient, allowed: &'a AllowList, options: RunOptions) -> Self {
        Self {
            client,
            allowed,
            options,
        }
    }

    /// Execute every step, reading answers from `input` and writing all
    /// operator-facing text to `out`.
    ///
    /// Fetch and save failures are reported on `out` and end or shorten the
    /// run; they are not returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Source of operator answers; ignored when not interactive
    /// * `out` - Operator-facing output
    ///
    /// # Returns
    ///
    /// The [`Outcome`] describing where the run stopped.
    ///
    /// # Errors
    ///
    /// Only failures writing to `out` or reading `input` are returned.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let workflow = Workflow::new(&client, &config.allowed_sources, options);
    /// let outcome = workflow.run(&mut StdinLines::spawn(), &mut io::stdout()).await?;
    /// ```
    #[instrument(level = "info", skip_all)]
    pub async fn run<S, W>(&self, input: &mut S, out: &mut W) -> Result<Outcome, Box<dyn Error>>
    where
        S: LineSource,
        W: Write,
    {
        let params = self.collect_params(input, out).await?;
        info!(tickers = %params.tickers, from = %params.window.time_from(), to = %params.window.time_to(), "Search parameters");

        writeln!(
            out,
            "\nFetching news for {} from {} to {}...",
            params.tickers,
            params.window.time_from(),
            params.window.time_to()
        )?;
        out.flush()?;

        let query = params.to_query(self.options.limit);
        let fetched = tokio::select! {
            feed = self.client.fetch_news(&query, out) => Some(feed),
            Ok(()) = tokio::signal::ctrl_c() => None,
        };
        let Some(feed) = fetched else {
            warn!("Interrupted during fetch");
            writeln!(out, "\nInterrupted; stopping before any results were received.")?;
            return Ok(Outcome::Interrupted);
        };

        if feed.is_empty() {
            writeln!(out, "\nNo news articles found for the specified period.")?;
            return Ok(Outcome::NoArticles);
        }

        writeln!(
            out,
            "\nFound {} total articles from {} unique sources.",
            feed.len(),
            feed.sources.len()
        )?;
        writeln!(out, "\nAvailable sources:")?;
        for (i, source) in feed.sources.iter().enumerate() {
            writeln!(out, "{}. {source}", i + 1)?;
        }

        for ticker in params.tickers.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let summary = sentiment::summarize(&feed.items, ticker);
            info!(ticker, label = %summary.label, confidence = summary.confidence, relevant = summary.relevant, "Ticker sentiment");
            write!(out, "\n{summary}")?;
        }

        let filtered = filter_by_sources(&feed.items, self.allowed);
        info!(total = feed.len(), kept = filtered.len(), "Applied source filter");

        if filtered.is_empty() {
            writeln!(out, "\nNo articles found from the specified sources.")?;
            let common = most_common_sources(&feed.items, TOP_SOURCES);
            if !common.is_empty() {
                writeln!(out, "\nMost common sources in this period:")?;
                for (source, count) in common {
                    writeln!(out, "- {source}: {count} articles")?;
                }
            }
            return Ok(Outcome::NoneFromSources);
        }

        writeln!(out, "\nFound {} articles from selected sources:", filtered.len())?;
        write!(out, "{}", listing::render_listing(&filtered, self.options.display_limit))?;

        let saved = match &self.options.output {
            Some(path) => save(&filtered, path.clone(), out).await?,
            None if self.options.interactive => self.offer_save(&filtered, &params, input, out).await?,
            None => None,
        };

        Ok(Outcome::Listed {
            count: filtered.len(),
            saved,
        })
    }

    /// Ask for tickers and dates. End of input or Ctrl-C keeps whatever has
    /// been answered so far and defaults the rest.
    async fn collect_params<S, W>(&self, input: &mut S, out: &mut W) -> io::Result<SearchParams>
    where
        S: LineSource,
        W: Write,
    {
        let mut params = self.options.defaults.clone();
        if !self.options.interactive {
            return Ok(params);
        }

        let prompt = format!(
            "Enter ticker symbols (comma-separated, default {}): ",
            params.tickers
        );
        let Some(tickers) = answer_or_defaults(ask(input, out, &prompt).await?, out)? else {
            return Ok(params);
        };
        if !tickers.is_empty() {
            params.tickers = tickers.to_uppercase();
        }

        let prompt = format!("Start date (YYYYMMDD, default {}): ", compact(params.window.from));
        let Some(from) = answer_or_defaults(ask(input, out, &prompt).await?, out)? else {
            return Ok(params);
        };
        params.window.from = parse_or_keep(&from, params.window.from, out)?;

        let prompt = format!("End date (YYYYMMDD, default {}): ", compact(params.window.to));
        let Some(to) = answer_or_defaults(ask(input, out, &prompt).await?, out)? else {
            return Ok(params);
        };
        params.window.to = parse_or_keep(&to, params.window.to, out)?;

        Ok(params)
    }

    /// Optional save step. End of input or Ctrl-C skips it.
    async fn offer_save<S, W>(
        &self,
        articles: &[NewsItem],
        params: &SearchParams,
        input: &mut S,
        out: &mut W,
    ) -> io::Result<Option<PathBuf>>
    where
        S: LineSource,
        W: Write,
    {
        let confirm = ask(
            input,
            out,
            "\nWould you like to save these results to a JSON file? (y/N): ",
        )
        .await?;
        match confirm {
            PromptInput::Line(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes") => {}
            PromptInput::Line(_) => return Ok(None),
            PromptInput::Eof | PromptInput::Interrupted => {
                writeln!(out, "\nSkipping save to file.")?;
                return Ok(None);
            }
        }

        let default_name = default_save_filename(params);
        let prompt = format!("Enter filename (default: {default_name}): ");
        let filename = match ask(input, out, &prompt).await? {
            PromptInput::Line(name) if !name.is_empty() => name,
            PromptInput::Line(_) => default_name,
            PromptInput::Eof | PromptInput::Interrupted => {
                writeln!(out, "\nSkipping save to file.")?;
                return Ok(None);
            }
        };

        save(articles, PathBuf::from(filename), out).await
    }
}

/// Write the file and tell the operator how it went. A failed write is
/// reported, not propagated.
async fn save<W: Write>(
    articles: &[NewsItem],
    path: PathBuf,
    out: &mut W,
) -> io::Result<Option<PathBuf>> {
    match json::write_articles(articles, &path).await {
        Ok(count) => {
            writeln!(out, "\nSaved {count} articles to {}", path.display())?;
            Ok(Some(path))
        }
        Err(e) => {
            writeln!(out, "Error saving to file: {}", error_chain(&e))?;
            Ok(None)
        }
    }
}

/// `Some(line)` for an answer; `None` (after telling the operator) when input
/// ended or was interrupted.
fn answer_or_defaults<W: Write>(input: PromptInput, out: &mut W) -> io::Result<Option<String>> {
    match input {
        PromptInput::Line(line) => Ok(Some(line)),
        PromptInput::Eof | PromptInput::Interrupted => {
            writeln!(out, "\nUsing default values...")?;
            Ok(None)
        }
    }
}

/// Parse a `YYYYMMDD` answer; blank keeps `current`, garbage is reported and
/// also keeps `current`.
fn parse_or_keep<W: Write>(answer: &str, current: NaiveDate, out: &mut W) -> io::Result<NaiveDate> {
    if answer.is_empty() {
        return Ok(current);
    }
    match DateWindow::parse_day(answer) {
        Ok(date) => Ok(date),
        Err(e) => {
            warn!(%answer, error = %e, "Ignoring unparseable date");
            writeln!(out, "Invalid date '{answer}' ({e}); using {}", compact(current))?;
            Ok(current)
        }
    }
}

fn compact(date: NaiveDate) -> String {
    date.format(COMPACT_DATE_FORMAT).to_string()
}
