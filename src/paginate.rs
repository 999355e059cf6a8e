//! Page-by-page retrieval of one month's articles.
//!
//! The paginator computes how many full pages cover the requested item
//! count and walks them sequentially, pausing periodically to respect the
//! API's rate limits. The result is the per-page record lists, in order,
//! not yet flattened.
//!
//! Number of page calls is `requested / page_size` using integer division:
//! a remainder is never fetched, so asking for 12 items with a page size of
//! 10 issues exactly one call and leaves 2 items behind.

use crate::api::{SearchClient, SearchQuery};
use crate::models::{ArticleRecord, extract_records};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Fetch up to `requested` articles for the date range carried by
/// `base_query`, one page at a time.
///
/// Pages are numbered from 1. Before every call whose page number is a
/// multiple of `sleep_frequency`, execution pauses for one second.
///
/// A failed page is logged with its page number and date range, pagination
/// stops, and the pages accumulated so far are returned so the caller can
/// still persist them. An empty page is not a failure; the walk continues.
///
/// # Arguments
///
/// * `client` - The search client to fetch pages through
/// * `requested` - Total number of articles wanted for this range
/// * `base_query` - Query already bounded to the month's date range
/// * `sleep_frequency` - Pause for 1s before every Nth call (0 disables)
///
/// # Returns
///
/// One record list per fetched page, in page order.
#[instrument(level = "info", skip_all, fields(from = ?base_query.from_date, to = ?base_query.to_date))]
pub async fn fetch_pages<C: SearchClient>(
    client: &C,
    requested: u32,
    base_query: &SearchQuery,
    sleep_frequency: u32,
) -> Vec<Vec<ArticleRecord>> {
    let num_pages = requested / base_query.page_size;
    let mut pages: Vec<Vec<ArticleRecord>> = Vec::with_capacity(num_pages as usize);

    for page in 1..=num_pages {
        if sleep_frequency > 0 && page % sleep_frequency == 0 {
            debug!(page, "Pausing to respect rate limits");
            sleep(Duration::from_secs(1)).await;
        }

        let query = base_query.clone().with_page(page);
        match client.fetch_page(&query).await {
            Ok(raw_articles) => {
                if raw_articles.is_empty() {
                    info!(page, "No articles in this batch");
                }
                let (records, skipped) = extract_records(raw_articles);
                if skipped > 0 {
                    warn!(
                        page,
                        skipped, "Skipped articles missing required fields"
                    );
                }
                debug!(page, count = records.len(), "Fetched page");
                pages.push(records);
            }
            Err(e) => {
                warn!(
                    page,
                    from = ?base_query.from_date,
                    to = ?base_query.to_date,
                    error = %e,
                    "Page fetch failed; stopping pagination for this range"
                );
                break;
            }
        }
    }

    pages
}

/// Flatten per-page record lists into one sequence, preserving page order
/// and within-page order.
pub fn flatten_pages(pages: Vec<Vec<ArticleRecord>>) -> Vec<ArticleRecord> {
    pages.into_iter().flatten().collect()
}
