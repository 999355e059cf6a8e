//! # Guardian Corpus
//!
//! A single-purpose CLI that builds a flat-file corpus of Guardian news
//! articles. It walks a bounded range of calendar months, paginates the
//! Content API search endpoint for each month, flattens every article into
//! one record, and writes one JSON batch file per month. A separate
//! subcommand concatenates all batches into one combined dataset.
//!
//! ## Usage
//!
//! ```sh
//! guardian_corpus scrape -s 2018-11 -e 2019-03 -a 200 --api-key YOUR_KEY
//! guardian_corpus combine
//! ```
//!
//! ## Architecture
//!
//! The scrape subcommand runs a strictly sequential pipeline per month:
//! 1. **Month walk**: compute the month's first and last day
//! 2. **Pagination**: one GET per page, pausing periodically for rate limits
//! 3. **Extraction**: flatten raw articles into records, skipping malformed ones
//! 4. **Batch write**: persist the month's records to a date-named file
//!
//! The combine subcommand rescans the monthly directory and rewrites the
//! combined dataset from scratch.

use clap::Parser;
use std::time::Duration as StdDuration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod paginate;
mod scrape;
mod utils;

use api::{GuardianClient, RetrySearch};
use cli::{Cli, Command};
use config::Config;
use error::Result;
use utils::{ensure_writable_dir, parse_month};

/// Retry budget for transient transport failures on a single page fetch.
const MAX_RETRIES: usize = 3;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("guardian_corpus starting up");

    let args = Cli::parse();

    match args.command {
        Command::Scrape {
            start_month,
            end_month,
            articles_per_month,
            endpoint,
            api_key,
            config,
            data_dir,
        } => {
            let config = Config::load(config.as_deref(), api_key, data_dir)?;
            let start = parse_month(&start_month)?;
            let end = parse_month(&end_month)?;

            // Early check: ensure the batch output dir is writable
            let monthly_dir = config.monthly_dir();
            if let Err(e) = ensure_writable_dir(&monthly_dir).await {
                error!(
                    path = %monthly_dir,
                    error = %e,
                    "Batch output directory is not writable (fix perms or choose a different path)"
                );
                return Err(e);
            }

            let client = RetrySearch::new(
                GuardianClient::new(&endpoint)?,
                MAX_RETRIES,
                StdDuration::from_secs(1),
            );

            scrape::run_scrape(&client, &config, start, end, articles_per_month).await?;
        }
        Command::Combine { config, data_dir } => {
            let config = Config::load(config.as_deref(), None, data_dir)?;
            let count = outputs::combine::combine_batches(&config.data_dir).await?;
            info!(count, "Combined dataset ready");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
