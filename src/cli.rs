//! Command-line interface definitions for the Guardian corpus builder.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The two subcommands mirror the two independent phases of the pipeline:
//! `scrape` fetches and writes monthly batches, `combine` merges them.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Guardian corpus builder.
///
/// # Examples
///
/// ```sh
/// # Scrape four months of articles, 200 per month
/// guardian_corpus scrape -s 2018-11 -e 2019-03 -a 200 --api-key YOUR_KEY
///
/// # API key from the environment, settings from a config file
/// GUARDIAN_API_KEY=YOUR_KEY guardian_corpus scrape -s 2018-11 -e 2019-03 -a 200 -c config.yaml
///
/// # Merge everything scraped so far into one dataset
/// guardian_corpus combine -d ./data
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch articles month by month and write one batch file per month
    Scrape {
        /// First month to fetch, inclusive (YYYY-MM)
        #[arg(short, long)]
        start_month: String,

        /// End of the range, exclusive (YYYY-MM)
        #[arg(short, long)]
        end_month: String,

        /// Number of articles to request per month
        #[arg(short, long)]
        articles_per_month: u32,

        /// Content API search endpoint
        #[arg(
            long,
            default_value = "https://content.guardianapis.com/search"
        )]
        endpoint: String,

        /// Guardian Content API key
        #[arg(long, env = "GUARDIAN_API_KEY")]
        api_key: Option<String>,

        /// Optional path to config.yaml
        #[arg(short, long)]
        config: Option<String>,

        /// Base directory for batch and combined output
        #[arg(short, long)]
        data_dir: Option<String>,
    },

    /// Concatenate all monthly batch files into one combined dataset
    Combine {
        /// Optional path to config.yaml
        #[arg(short, long)]
        config: Option<String>,

        /// Base directory for batch and combined output
        #[arg(short, long)]
        data_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_scrape() {
        let cli = Cli::parse_from(&[
            "guardian_corpus",
            "scrape",
            "--start-month",
            "2018-11",
            "--end-month",
            "2019-03",
            "--articles-per-month",
            "200",
            "--api-key",
            "k",
        ]);

        match cli.command {
            Command::Scrape {
                start_month,
                end_month,
                articles_per_month,
                endpoint,
                api_key,
                ..
            } => {
                assert_eq!(start_month, "2018-11");
                assert_eq!(end_month, "2019-03");
                assert_eq!(articles_per_month, 200);
                assert_eq!(endpoint, "https://content.guardianapis.com/search");
                assert_eq!(api_key.as_deref(), Some("k"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&[
            "guardian_corpus",
            "scrape",
            "-s",
            "2020-01",
            "-e",
            "2020-02",
            "-a",
            "50",
            "-d",
            "/tmp/corpus",
        ]);

        match cli.command {
            Command::Scrape {
                start_month,
                data_dir,
                ..
            } => {
                assert_eq!(start_month, "2020-01");
                assert_eq!(data_dir.as_deref(), Some("/tmp/corpus"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_combine() {
        let cli = Cli::parse_from(&["guardian_corpus", "combine", "-d", "/srv/corpus"]);

        match cli.command {
            Command::Combine { data_dir, .. } => {
                assert_eq!(data_dir.as_deref(), Some("/srv/corpus"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_scrape_requires_months() {
        assert!(Cli::try_parse_from(&["guardian_corpus", "scrape", "-a", "50"]).is_err());
    }
}
