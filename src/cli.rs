//! Command-line interface definitions.
//!
//! Every option can also come from the environment (or a `.env` file loaded
//! at startup). Search flags only change the defaults; the interactive
//! prompts still run unless `--non-interactive` is given.

use crate::config::{ALPHA_VANTAGE_ENDPOINT, DEFAULT_FROM, DEFAULT_TICKERS, DEFAULT_TO, MAX_LIMIT};
use crate::models::{DateWindow, SearchParams};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Prompt for everything, using META / 2025-01-28..2025-02-28 as defaults
/// av_news_filter
///
/// # Scripted run that saves straight to a file
/// av_news_filter --non-interactive --tickers meta,aapl --from 20250101 --to 20250131 -o out.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Alpha Vantage API key
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// News sentiment endpoint
    #[arg(long, env = "AV_BASE_URL", default_value = ALPHA_VANTAGE_ENDPOINT)]
    pub endpoint: String,

    /// Default ticker symbols (comma-separated)
    #[arg(short, long, default_value = DEFAULT_TICKERS)]
    pub tickers: String,

    /// Default start date (YYYYMMDD)
    #[arg(long, default_value = DEFAULT_FROM, value_parser = parse_date)]
    pub from: NaiveDate,

    /// Default end date (YYYYMMDD)
    #[arg(long, default_value = DEFAULT_TO, value_parser = parse_date)]
    pub to: NaiveDate,

    /// Number of articles to request (clamped to 1..=1000)
    #[arg(short, long, default_value_t = MAX_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Number of filtered articles to print
    #[arg(short, long, default_value_t = 10)]
    pub display_limit: usize,

    /// Skip all prompts and use the defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Save filtered articles to this file without asking
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Search parameters implied by the flags alone.
    pub fn search_defaults(&self) -> SearchParams {
        SearchParams {
            tickers: self.tickers.trim().to_uppercase(),
            window: DateWindow::new(self.from, self.to),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DateWindow::parse_day(s).map_err(|e| format!("expected YYYYMMDD: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["av_news_filter", "--api-key", "k"]);
        assert_eq!(cli.api_key, "k");
        assert_eq!(cli.limit, 1000);
        assert_eq!(cli.display_limit, 10);
        assert!(!cli.non_interactive);
        assert!(cli.output.is_none());

        let search = cli.search_defaults();
        assert_eq!(search.tickers, "META");
        assert_eq!(search.window.time_from(), "20250128T0000");
        assert_eq!(search.window.time_to(), "20250228T2359");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "av_news_filter",
            "--api-key",
            "k",
            "-t",
            "meta,aapl",
            "--from",
            "20240101",
            "--to",
            "20240131",
            "-l",
            "-5",
            "--non-interactive",
            "-o",
            "out.json",
        ]);
        let search = cli.search_defaults();
        assert_eq!(search.tickers, "META,AAPL");
        assert_eq!(search.window.time_from(), "20240101T0000");
        assert_eq!(cli.limit, -5);
        assert!(cli.non_interactive);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let res = Cli::try_parse_from(["av_news_filter", "--api-key", "k", "--from", "2025-01-28"]);
        assert!(res.is_err());
    }
}
