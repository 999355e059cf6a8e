//! Month-by-month scrape orchestration.
//!
//! [`MonthWindows`] turns a `[start month, end month)` range into one
//! `(first day, last day)` window per calendar month. For each window the
//! scrape loop bounds the query to that month, paginates, flattens the
//! per-page results, and writes the month's batch file. Empty months still
//! produce a file, so the on-disk batches always cover the requested range.

use crate::api::{SearchClient, SearchQuery};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::outputs::batch;
use crate::paginate::{fetch_pages, flatten_pages};
use crate::utils::{end_of_current_month, months_between, start_of_next_month, yyyy_mm_dd};
use chrono::NaiveDate;
use tracing::{info, instrument};

/// One whole calendar month: its first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Iterator over the whole months in `[start, end)`.
///
/// Yields exactly `(end.year*12 + end.month) - (start.year*12 +
/// start.month)` windows; a range that ends on or before its start yields
/// nothing.
#[derive(Debug)]
pub struct MonthWindows {
    current: NaiveDate,
    remaining: u32,
}

impl MonthWindows {
    /// Build the iterator from two month-start dates (end exclusive).
    pub fn new(start_month: NaiveDate, end_month: NaiveDate) -> Self {
        Self {
            current: start_month,
            remaining: months_between(start_month, end_month),
        }
    }
}

impl Iterator for MonthWindows {
    type Item = MonthWindow;

    fn next(&mut self) -> Option<MonthWindow> {
        if self.remaining == 0 {
            return None;
        }
        let from = self.current;
        let to = end_of_current_month(from);
        self.current = start_of_next_month(from);
        self.remaining -= 1;
        Some(MonthWindow { from, to })
    }
}

/// Walk every month in `[start_month, end_month)`, fetch up to
/// `articles_per_month` articles for each, and persist one batch file per
/// month under the configured data directory.
///
/// # Errors
///
/// Fails fast with [`Error::MissingApiKey`] before any network call if no
/// key was configured, and propagates batch-write failures. Page-level
/// fetch failures do not surface here; they end the affected month early
/// and its accumulated records are still written.
#[instrument(level = "info", skip_all, fields(start = %start_month, end = %end_month))]
pub async fn run_scrape<C: SearchClient>(
    client: &C,
    config: &Config,
    start_month: NaiveDate,
    end_month: NaiveDate,
    articles_per_month: u32,
) -> Result<()> {
    let api_key = config.api_key.as_deref().ok_or(Error::MissingApiKey)?;
    let base_query = SearchQuery::new(api_key, config.page_size);

    let months = months_between(start_month, end_month);
    info!(months, articles_per_month, "Starting monthly scrape");

    for window in MonthWindows::new(start_month, end_month) {
        let from = yyyy_mm_dd(window.from);
        let to = yyyy_mm_dd(window.to);
        info!(%from, %to, "Current time range");

        let query = base_query.clone().with_date_range(window.from, window.to);
        let pages = fetch_pages(client, articles_per_month, &query, config.sleep_frequency).await;
        let records: Vec<ArticleRecord> = flatten_pages(pages);

        info!(%from, %to, count = records.len(), "Collected articles for month");
        batch::write_batch(&records, &from, &to, &config.data_dir).await?;
    }

    Ok(())
}
