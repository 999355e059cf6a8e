//! Monthly batch persistence.
//!
//! One batch file per scraped month, serialized as a JSON array of flat
//! records. The file name embeds the month's date range so the merge step
//! (and a human browsing the directory) can tell batches apart:
//!
//! ```text
//! data_dir/
//! └── monthly/
//!     ├── articles_2018-11-01_to_2018-11-30.json
//!     └── articles_2018-12-01_to_2018-12-31.json
//! ```
//!
//! Re-running a scrape over the same month overwrites its batch silently.

use crate::error::Result;
use crate::models::ArticleRecord;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize one month's records and write them under `<data_dir>/monthly/`.
///
/// Creates the directory if needed. An empty record list still produces a
/// file, so the on-disk batches always cover the full scraped range.
///
/// # Returns
///
/// The path of the file written.
#[instrument(level = "info", skip_all, fields(%from, %to))]
pub async fn write_batch(
    records: &[ArticleRecord],
    from: &str,
    to: &str,
    data_dir: &str,
) -> Result<String> {
    let json = serde_json::to_string(records)?;

    let monthly_dir = format!("{}/monthly", data_dir);
    fs::create_dir_all(&monthly_dir).await?;

    let path = format!("{}/articles_{}_to_{}.json", monthly_dir, from, to);
    info!(path = %path, count = records.len(), "Writing monthly batch");
    fs::write(&path, json).await?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ArticleRecord {
        ArticleRecord {
            id: id.to_string(),
            section: "World news".to_string(),
            title: "Title".to_string(),
            url: "https://example.test".to_string(),
            body_text: "Body".to_string(),
            published_at: "2018-11-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_batch_names_file_by_date_range() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().display().to_string();

        let path = write_batch(&[record("a")], "2018-11-01", "2018-11-30", &data_dir)
            .await
            .unwrap();

        assert!(path.ends_with("monthly/articles_2018-11-01_to_2018-11-30.json"));
        let written: Vec<ArticleRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, vec![record("a")]);
    }

    #[tokio::test]
    async fn test_write_batch_overwrites_silently() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().display().to_string();

        write_batch(&[record("old")], "2018-11-01", "2018-11-30", &data_dir)
            .await
            .unwrap();
        let path = write_batch(&[record("new")], "2018-11-01", "2018-11-30", &data_dir)
            .await
            .unwrap();

        let written: Vec<ArticleRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].id, "new");
    }

    #[tokio::test]
    async fn test_write_batch_accepts_empty_months() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().display().to_string();

        let path = write_batch(&[], "2019-02-01", "2019-02-28", &data_dir)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
