//! # AV News Filter
//!
//! Fetches Alpha Vantage news sentiment for one or more tickers, keeps only
//! articles from a fixed set of publishers, prints them, and optionally saves
//! them as JSON.
//!
//! ## Usage
//!
//! ```sh
//! ALPHA_VANTAGE_API_KEY=... av_news_filter
//! ```
//!
//! ## Architecture
//!
//! The application is a single linear pass:
//! 1. **Collect**: tickers and date window from prompts or defaults
//! 2. **Fetch**: one `NEWS_SENTIMENT` request
//! 3. **Filter**: keep allow-listed publishers
//! 4. **Output**: numbered listing, optional JSON file
//!
//! Errors never change the exit status; they are printed and the run ends.

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod filter;
mod models;
mod outputs;
mod prompt;
mod sentiment;
mod utils;
mod workflow;

use api::AlphaVantageClient;
use cli::Cli;
use config::NewsConfig;
use prompt::StdinLines;
use workflow::{Outcome, RunOptions, Workflow};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up ALPHA_VANTAGE_API_KEY and RUST_LOG from .env if present
    dotenvy::dotenv().ok();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(tickers = %args.tickers, limit = args.limit, non_interactive = args.non_interactive, "Parsed CLI arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, &mut out).await {
        Ok(outcome) => info!(?outcome, "Run finished"),
        Err(e) => report_failure(&mut out, e.as_ref())?,
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

async fn run<W: Write>(args: &Cli, out: &mut W) -> Result<Outcome, Box<dyn Error>> {
    let config = NewsConfig::new(args.api_key.clone(), &args.endpoint)?;
    debug!(?config, "Loaded configuration");

    let client = AlphaVantageClient::new(config.clone())?;
    let options = RunOptions {
        defaults: args.search_defaults(),
        limit: args.limit,
        display_limit: args.display_limit,
        interactive: !args.non_interactive,
        output: args.output.clone(),
    };
    let workflow = Workflow::new(&client, &config.allowed_sources, options);

    let mut input = StdinLines::spawn();
    workflow.run(&mut input, out).await
}

/// Print an error, each of its causes on its own line, and a retry hint.
fn report_failure<W: Write>(out: &mut W, e: &dyn Error) -> io::Result<()> {
    tracing::error!(error = %utils::error_chain(e), "Run failed");
    writeln!(out, "\nAn error occurred: {e}")?;
    let mut source = e.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {cause}")?;
        source = cause.source();
    }
    writeln!(
        out,
        "\nPlease make sure you have a stable internet connection and try again."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_report_failure_prints_chain_and_hint() {
        let err = NewsConfig::new("key", "::bad::").unwrap_err();
        assert!(matches!(err, ConfigError::Endpoint { .. }));

        let mut out = Vec::new();
        report_failure(&mut out, &err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("An error occurred: invalid endpoint URL '::bad::'\n"));
        assert!(text.contains("  caused by: relative URL without a base\n"));
        assert_eq!(text.matches("relative URL without a base").count(), 1);
        assert!(text.ends_with("try again.\n"));
    }
}
