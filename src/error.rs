//! Crate-wide error type and `Result` alias.
//!
//! The variants follow the failure surfaces of the pipeline: transport
//! errors from `reqwest`, non-success HTTP statuses from the Content API,
//! filesystem I/O, JSON (de)serialization of batches, YAML configuration,
//! and unusable caller input (months, endpoint, API key).

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-success status. For the Guardian search
    /// endpoint this usually means there are no more articles matching the
    /// criteria, so callers treat it as the end of pagination rather than a
    /// fatal failure.
    #[error("API responded with HTTP {status} on page {page}")]
    Status { status: u16, page: u32 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("No API key provided; pass --api-key, set GUARDIAN_API_KEY, or add api_key to the config file")]
    MissingApiKey,
}

impl Error {
    /// Only transport failures are worth retrying; a non-success status or a
    /// payload that does not parse will not get better on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
