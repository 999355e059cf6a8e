//! Combine monthly batches into one dataset.
//!
//! The merge is a full rescan and rewrite: every `*.json` batch under
//! `<data_dir>/monthly/` is read back and concatenated row-wise into
//! `<data_dir>/combined/guardian_articles.json`. File names are sorted
//! before reading so the combined order is deterministic across platforms.
//! No deduplication happens here: overlapping or re-run ranges duplicate.

use crate::error::Result;
use crate::models::ArticleRecord;
use itertools::Itertools;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Name of the combined dataset file.
pub const COMBINED_FILE: &str = "guardian_articles.json";

/// Read every monthly batch under `<data_dir>/monthly/`, concatenate them
/// in sorted filename order, and write the combined dataset.
///
/// # Returns
///
/// The number of records in the combined dataset.
///
/// # Errors
///
/// Fails if the monthly directory cannot be read (e.g. no scrape has run
/// yet), or if a batch file cannot be read or parsed.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir))]
pub async fn combine_batches(data_dir: &str) -> Result<usize> {
    let monthly_dir = format!("{}/monthly", data_dir);

    let mut entries = fs::read_dir(&monthly_dir).await?;
    let mut batch_paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            batch_paths.push(path);
        }
    }
    // Directory listing order is platform-dependent; sort for determinism.
    let batch_paths = batch_paths.into_iter().sorted().collect::<Vec<_>>();

    let mut combined: Vec<ArticleRecord> = Vec::new();
    for path in &batch_paths {
        let contents = fs::read_to_string(path).await?;
        let records: Vec<ArticleRecord> = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), count = records.len(), "Read monthly batch");
        combined.extend(records);
    }

    let combined_dir = format!("{}/combined", data_dir);
    fs::create_dir_all(&combined_dir).await?;
    let out_path = format!("{}/{}", combined_dir, COMBINED_FILE);
    fs::write(&out_path, serde_json::to_string(&combined)?).await?;

    info!(
        path = %out_path,
        files = batch_paths.len(),
        count = combined.len(),
        "Wrote combined dataset"
    );
    Ok(combined.len())
}
