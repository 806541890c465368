//! Job listing scraper.
//! Loads marketplace search result pages, pulls the job tiles out of them
//! and turns "posted 3 hours ago" into real timestamps.

pub mod config;
mod error;
mod macros;
pub mod model;
pub mod parse;
pub mod process;
pub mod request;
pub mod time;

pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use model::{JobRecord, SearchContext, SearchMode};
pub use process::Scraper;

/// Origin of the marketplace.
pub const BASE_URL: &str = "https://www.upwork.com";
/// Desktop browser identity, without it a reduced page is served.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) \
Chrome/91.0.4472.124 Safari/537.36";
