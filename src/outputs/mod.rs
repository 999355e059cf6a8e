//! Output persistence for monthly batches and the combined dataset.
//!
//! # Submodules
//!
//! - [`batch`]: Writes one JSON batch file per scraped month
//! - [`combine`]: Concatenates all monthly batches into one dataset file
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── monthly/
//! │   ├── articles_2018-11-01_to_2018-11-30.json
//! │   └── articles_2018-12-01_to_2018-12-31.json
//! └── combined/
//!     └── guardian_articles.json
//! ```

pub mod batch;
pub mod combine;
