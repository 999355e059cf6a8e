//! Data models for the Guardian search API and the flattened corpus record.
//!
//! Two layers live here:
//! - The wire types ([`SearchResponse`], [`RawArticle`], [`Blocks`],
//!   [`BodyBlock`]) mirror the JSON envelope the Content API returns:
//!   `{response: {results: [...]}}`. Nested fields are optional at the wire
//!   level because the API omits them for some content types.
//! - [`ArticleRecord`] is the flat, immutable record that gets written into
//!   monthly batch files and later concatenated into the combined dataset.
//!
//! The wire types use camelCase renames to match the API's JSON field names.

use serde::{Deserialize, Serialize};

/// Top-level envelope of a Content API search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub response: SearchBody,
}

/// Inner body of the search envelope.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub results: Vec<RawArticle>,
}

/// One raw article as returned by the search endpoint.
///
/// Only `id` and `type` are guaranteed; everything else may be missing and
/// makes the article malformed for extraction purposes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub id: String,
    /// Content type, e.g. `"article"`, `"liveblog"`, `"crossword"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub section_name: Option<String>,
    pub web_title: Option<String>,
    pub web_url: Option<String>,
    pub web_publication_date: Option<String>,
    pub blocks: Option<Blocks>,
}

/// The `blocks` object requested via `show-blocks=body`.
#[derive(Debug, Clone, Deserialize)]
pub struct Blocks {
    #[serde(default)]
    pub body: Vec<BodyBlock>,
}

/// One body block; the summary carries the article's full plain text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyBlock {
    pub body_text_summary: Option<String>,
}

/// A flattened article record, one row of the corpus.
///
/// Immutable once created; serialized into monthly batch files and read
/// back during the combine step, so it derives both `Serialize` and
/// `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The Guardian's stable article id, e.g. `"world/2018/nov/01/..."`.
    pub id: String,
    /// Human-readable section name, e.g. `"World news"`.
    pub section: String,
    /// Article headline.
    pub title: String,
    /// Canonical web URL.
    pub url: String,
    /// Plain-text article body from the first body block.
    pub body_text: String,
    /// ISO-8601 publication timestamp as returned by the API.
    pub published_at: String,
}

impl ArticleRecord {
    /// Build a flat record from a raw article, or `None` if any required
    /// field is absent.
    fn from_raw(raw: &RawArticle) -> Option<Self> {
        let body_text = raw
            .blocks
            .as_ref()?
            .body
            .first()?
            .body_text_summary
            .clone()?;

        Some(ArticleRecord {
            id: raw.id.clone(),
            section: raw.section_name.clone()?,
            title: raw.web_title.clone()?,
            url: raw.web_url.clone()?,
            body_text,
            published_at: raw.web_publication_date.clone()?,
        })
    }
}

/// Flatten raw articles into records, skipping malformed ones.
///
/// An article missing any required nested field (section, title, URL,
/// publication date, or `blocks.body[0].bodyTextSummary`) is dropped and
/// counted. Callers log the skipped count with their own context; nothing
/// is printed here.
///
/// # Returns
///
/// The extracted records in input order, and the number of articles skipped.
pub fn extract_records(articles: Vec<RawArticle>) -> (Vec<ArticleRecord>, usize) {
    let mut records = Vec::with_capacity(articles.len());
    let mut skipped = 0usize;

    for raw in &articles {
        match ArticleRecord::from_raw(raw) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    (records, skipped)
}
