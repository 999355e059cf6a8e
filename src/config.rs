//! Runtime configuration.
//!
//! Configuration is resolved once at startup and passed into components as
//! an explicit [`Config`] value; nothing reads ambient process-wide state
//! after that. Values come from three layers, highest precedence first:
//!
//! 1. CLI flags (including their environment fallbacks, e.g.
//!    `GUARDIAN_API_KEY`)
//! 2. An optional YAML config file (`--config config.yaml`)
//! 3. Built-in defaults
//!
//! The API key has no default: the scrape subcommand fails fast without one.

use crate::error::Result;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_SLEEP_FREQUENCY: u32 = 5;

/// Raw shape of the YAML config file; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    page_size: Option<u32>,
    data_dir: Option<String>,
    sleep_frequency: Option<u32>,
}

/// Resolved configuration handed to the pipeline at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content API key; `None` until a key is supplied by flag, env, or file.
    pub api_key: Option<String>,
    /// Articles per API page.
    pub page_size: u32,
    /// Base directory holding `monthly/` and `combined/` outputs.
    pub data_dir: String,
    /// Pause for 1s before every Nth page call.
    pub sleep_frequency: u32,
}

impl Config {
    /// Resolve configuration from an optional YAML file and CLI overrides.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to a YAML config file
    /// * `api_key` - API key from the CLI flag or environment, if any
    /// * `data_dir` - Data directory from the CLI flag, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the file is named but unreadable or not valid
    /// YAML. A missing API key is not an error here; the scrape path checks
    /// for it before any network call.
    pub fn load(
        config_path: Option<&str>,
        api_key: Option<String>,
        data_dir: Option<String>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                let parsed: FileConfig = serde_yaml::from_str(&contents)?;
                info!(path, "Loaded configuration file");
                parsed
            }
            None => FileConfig::default(),
        };

        Ok(Config {
            api_key: api_key.or(file.api_key),
            page_size: file.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            data_dir: data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            sleep_frequency: file.sleep_frequency.unwrap_or(DEFAULT_SLEEP_FREQUENCY),
        })
    }

    /// Directory holding the per-month batch files.
    pub fn monthly_dir(&self) -> String {
        format!("{}/monthly", self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, String) {
        let tmp = tempfile::tempdir().unwrap();
        let path = format!("{}/config.yaml", tmp.path().display());
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = Config::load(None, None, None).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.sleep_frequency, DEFAULT_SLEEP_FREQUENCY);
    }

    #[test]
    fn test_file_values_are_used() {
        let (_tmp, path) = write_config(
            "api_key: from-file\npage_size: 25\ndata_dir: /tmp/corpus\nsleep_frequency: 3\n",
        );
        let config = Config::load(Some(&path), None, None).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.data_dir, "/tmp/corpus");
        assert_eq!(config.sleep_frequency, 3);
    }

    #[test]
    fn test_cli_flags_override_file() {
        let (_tmp, path) = write_config("api_key: from-file\ndata_dir: /tmp/from-file\n");
        let config = Config::load(
            Some(&path),
            Some("from-flag".to_string()),
            Some("/tmp/from-flag".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.data_dir, "/tmp/from-flag");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let (_tmp, path) = write_config("api_key: from-file\n");
        let config = Config::load(Some(&path), None, None).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.data_dir, DEFAULT_DATA_DIR);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::load(Some("/nonexistent/config.yaml"), None, None).is_err());
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let (_tmp, path) = write_config("page_size: [not a number\n");
        assert!(Config::load(Some(&path), None, None).is_err());
    }

    #[test]
    fn test_monthly_dir_derives_from_data_dir() {
        let config = Config::load(None, None, Some("/srv/corpus".to_string())).unwrap();
        assert_eq!(config.monthly_dir(), "/srv/corpus/monthly");
    }
}
