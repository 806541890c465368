use config::{Config, Environment};
use serde::Deserialize;

use crate::{Result, BASE_URL, USER_AGENT};

/// Settings for a [`Scraper`](crate::process::Scraper).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScraperConfig {
    /// Origin of the marketplace, also used to resolve relative job links.
    pub base_url: String,
    /// Sent with every navigation so the full page variant is served.
    pub user_agent: String,
    /// No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Max pages fetched by one multi-page search. If set to 0 there is no limit.
    pub page_limit: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            user_agent: USER_AGENT.into(),
            timeout_secs: None,
            page_limit: 0,
        }
    }
}

impl ScraperConfig {
    /// Defaults overridden by `JOBSCRAP_*` environment variables,
    /// e.g. `JOBSCRAP_TIMEOUT_SECS=30`.
    pub fn from_env() -> Result<Self> {
        let conf = Config::builder()
            .set_default("base_url", BASE_URL)?
            .set_default("user_agent", USER_AGENT)?
            .set_default("page_limit", 0_i64)?
            .add_source(Environment::with_prefix("JOBSCRAP").try_parsing(true))
            .build()?;
        Ok(conf.try_deserialize()?)
    }
}
