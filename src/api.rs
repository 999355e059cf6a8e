//! Content API interaction with exponential backoff retry logic.
//!
//! This module owns one page fetch: build the query string, perform the GET,
//! validate the HTTP status, deserialize the search envelope, and drop
//! content types that are not regular articles.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`SearchClient`]: Core trait defining one paginated search call
//! - [`GuardianClient`]: Wraps a `reqwest::Client` and the endpoint URL
//! - [`RetrySearch`]: Decorator that adds retry logic to any `SearchClient`
//!
//! # Retry Strategy
//!
//! Only transport errors are retried; a non-success HTTP status is the API's
//! way of saying there is nothing more to fetch for the current criteria and
//! is passed through untouched.
//!
//! - Exponential backoff starting at the configured base delay
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::error::{Error, Result};
use crate::models::{RawArticle, SearchResponse};
use crate::utils::yyyy_mm_dd;
use chrono::NaiveDate;
use rand::{rng, Rng};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};
use url::Url;

/// Content types that are excluded from extraction. Liveblogs and crosswords
/// are structured differently from normal news articles and their bodies do
/// not parse the same way.
const EXCLUDED_TYPES: [&str; 2] = ["liveblog", "crossword"];

/// An immutable set of query parameters for one search call.
///
/// Rebuilt per request instead of mutated in place: the paginator and the
/// month walker derive fresh values with [`SearchQuery::with_page`] and
/// [`SearchQuery::with_date_range`], so no shared parameter state exists
/// between calls.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub page: u32,
    pub page_size: u32,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    api_key: String,
    /// Caller-supplied extras, e.g. `show-blocks=body`.
    pub extras: Vec<(String, String)>,
}

impl SearchQuery {
    /// Create a base query with page 1, no date bounds, and the default
    /// `show-blocks=body` extra (the body blocks carry the article text).
    pub fn new(api_key: &str, page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            from_date: None,
            to_date: None,
            api_key: api_key.to_string(),
            extras: vec![("show-blocks".to_string(), "body".to_string())],
        }
    }

    /// Return a copy of this query targeting the given page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Return a copy of this query bounded to `[from, to]` (both inclusive),
    /// formatted the way the API expects.
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(yyyy_mm_dd(from));
        self.to_date = Some(yyyy_mm_dd(to));
        self
    }

    /// Append an extra query parameter.
    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extras.push((key.to_string(), value.to_string()));
        self
    }

    /// Render the query as key/value pairs for the request URL.
    pub fn as_params(&self) -> Vec<(&str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("page-size", self.page_size.to_string()),
        ];
        if let Some(ref from) = self.from_date {
            params.push(("from-date", from.clone()));
        }
        if let Some(ref to) = self.to_date {
            params.push(("to-date", to.clone()));
        }
        params.push(("api-key", self.api_key.clone()));
        for (key, value) in &self.extras {
            params.push((key.as_str(), value.clone()));
        }
        params
    }
}

/// Trait for one paginated search call against the Content API.
///
/// Implementors take an immutable query and return the raw articles for that
/// page. This abstraction is the seam the paginator is tested through, and
/// what [`RetrySearch`] decorates.
pub trait SearchClient {
    /// Fetch one page of search results.
    ///
    /// # Returns
    ///
    /// The raw articles for the page, already filtered down to regular
    /// articles, or an error if the request failed.
    async fn fetch_page(&self, query: &SearchQuery) -> Result<Vec<RawArticle>>;
}

/// Production [`SearchClient`] backed by `reqwest`.
#[derive(Debug)]
pub struct GuardianClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GuardianClient {
    /// Build a client for the given search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if the URL does not parse.
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }
}

/// Drop articles whose content type is excluded from extraction.
pub fn filter_article_types(results: Vec<RawArticle>) -> Vec<RawArticle> {
    results
        .into_iter()
        .filter(|article| !EXCLUDED_TYPES.contains(&article.kind.as_str()))
        .collect()
}

impl SearchClient for GuardianClient {
    #[instrument(level = "debug", skip_all, fields(page = query.page))]
    async fn fetch_page(&self, query: &SearchQuery) -> Result<Vec<RawArticle>> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&query.as_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                page: query.page,
            });
        }

        let body = response.text().await?;
        let envelope: SearchResponse = serde_json::from_str(&body)?;
        Ok(filter_article_types(envelope.response.results))
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`SearchClient`].
///
/// This decorator transparently retries transport failures with exponential
/// backoff and jitter. Non-retryable errors (a non-success status, a payload
/// that does not parse) are returned immediately.
///
/// # Backoff Strategy
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetrySearch<T> {
    /// The underlying search client to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetrySearch<T>
where
    T: SearchClient,
{
    /// Create a new retry wrapper around an existing [`SearchClient`].
    ///
    /// # Arguments
    ///
    /// * `inner` - The underlying client to wrap
    /// * `max_retries` - Maximum number of retry attempts
    /// * `base_delay` - Initial delay between retries
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetrySearch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrySearch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> SearchClient for RetrySearch<T>
where
    T: SearchClient + fmt::Debug,
{
    #[instrument(level = "debug", skip_all, fields(page = query.page))]
    async fn fetch_page(&self, query: &SearchQuery) -> Result<Vec<RawArticle>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch_page(query).await {
                Ok(articles) => {
                    return Ok(articles);
                }
                Err(e) if !e.is_retryable() => {
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch_page() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch_page() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
