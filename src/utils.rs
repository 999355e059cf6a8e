//! Calendar helpers and file system utilities.
//!
//! The month-boundary functions here drive the scrape loop: every monthly
//! window is `[first day of month, last day of month]`, and the walker
//! advances by whole months. All dates are `chrono::NaiveDate`; the API
//! wants them formatted as `YYYY-MM-DD`.

use crate::error::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate};
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Parse a `YYYY-MM` month argument into the first day of that month.
///
/// # Arguments
///
/// * `month` - A month in `YYYY-MM` form, e.g. `"2018-11"`
///
/// # Returns
///
/// The `NaiveDate` for day 1 of that month, or [`Error::InvalidMonth`] if
/// the input does not parse.
pub fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| Error::InvalidMonth(month.to_string()))
}

/// Return the last calendar day of the month containing `date`.
///
/// Works for any day-of-month input, leap Februaries included.
pub fn end_of_current_month(date: NaiveDate) -> NaiveDate {
    start_of_next_month(date) - Duration::days(1)
}

/// Return day 1 of the month following the one containing `date`.
///
/// December rolls over into January of the next year.
pub fn start_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Day 1 of a valid year/month always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Number of whole calendar months from `start` to `end` (end exclusive).
///
/// Computed as `(end.year*12 + end.month) - (start.year*12 + start.month)`;
/// a range that ends before it starts spans zero months.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end.year() * 12 + end.month() as i32) - (start.year() * 12 + start.month() as i32);
    span.max(0) as u32
}

/// Format a date the way the Content API expects its `from-date` and
/// `to-date` parameters.
pub fn yyyy_mm_dd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2018-11").unwrap(), date(2018, 11, 1));
        assert_eq!(parse_month("2020-02").unwrap(), date(2020, 2, 1));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(parse_month("2018").is_err());
        assert!(parse_month("2018-13").is_err());
        assert!(parse_month("november").is_err());
    }

    #[test]
    fn test_end_of_current_month_any_day() {
        assert_eq!(end_of_current_month(date(2018, 11, 1)), date(2018, 11, 30));
        assert_eq!(end_of_current_month(date(2018, 11, 17)), date(2018, 11, 30));
        assert_eq!(end_of_current_month(date(2018, 11, 30)), date(2018, 11, 30));
    }

    #[test]
    fn test_end_of_current_month_february() {
        assert_eq!(end_of_current_month(date(2023, 2, 10)), date(2023, 2, 28));
        // leap year
        assert_eq!(end_of_current_month(date(2024, 2, 10)), date(2024, 2, 29));
    }

    #[test]
    fn test_end_of_current_month_december() {
        assert_eq!(end_of_current_month(date(2019, 12, 5)), date(2019, 12, 31));
    }

    #[test]
    fn test_start_of_next_month() {
        assert_eq!(start_of_next_month(date(2018, 11, 30)), date(2018, 12, 1));
        assert_eq!(start_of_next_month(date(2018, 11, 1)), date(2018, 12, 1));
    }

    #[test]
    fn test_start_of_next_month_rolls_year() {
        assert_eq!(start_of_next_month(date(2019, 12, 15)), date(2020, 1, 1));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2018, 11, 1), date(2019, 3, 1)), 4);
        assert_eq!(months_between(date(2019, 1, 1), date(2019, 2, 1)), 1);
        assert_eq!(months_between(date(2019, 1, 1), date(2020, 1, 1)), 12);
    }

    #[test]
    fn test_months_between_empty_and_inverted_ranges() {
        assert_eq!(months_between(date(2019, 3, 1), date(2019, 3, 1)), 0);
        assert_eq!(months_between(date(2019, 3, 1), date(2018, 11, 1)), 0);
    }

    #[test]
    fn test_yyyy_mm_dd() {
        assert_eq!(yyyy_mm_dd(date(2018, 11, 1)), "2018-11-01");
        assert_eq!(yyyy_mm_dd(date(2020, 2, 29)), "2020-02-29");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = format!("{}/a/b", tmp.path().display());
        ensure_writable_dir(&nested).await.unwrap();
        assert!(std::path::Path::new(&nested).is_dir());
    }
}
