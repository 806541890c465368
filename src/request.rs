use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use url::form_urlencoded::byte_serialize;

use crate::config::ScraperConfig;
use crate::model::JobRecord;
use crate::parse::{parse_html, Extractor};
use crate::{info_time, Error, Result};

const SEARCH_PATH: &str = "/nx/search/jobs/";
/// Only jobs with fewer than 20 proposals.
const PROPOSALS: &str = "0-4,5-9,10-14,15-19";

/// Builds the search results URL for `keywords` on page `page`.
pub fn search_url(base_url: &str, keywords: &str, page: usize) -> String {
    let query: String = byte_serialize(keywords.as_bytes()).collect();
    format!(
        "{}{SEARCH_PATH}?nbs=1&proposals={PROPOSALS}&q={query}&page={page}",
        base_url.trim_end_matches('/')
    )
}

/// Loads a page and hands back its rendered markup.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String>;

    /// Releases whatever the renderer holds on to. Called once on shutdown.
    async fn close(&self) {}
}

/// Renders pages with a plain HTTP client posing as a desktop browser.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.into(),
            });
        }
        let html = res.text().await?;
        Ok(html)
    }
}

/// Navigates to one search results page and extracts its listings.
#[derive(Clone)]
pub struct PageFetcher {
    base_url: String,
    renderer: Arc<dyn Renderer>,
    extractor: Arc<Extractor>,
}

impl PageFetcher {
    pub fn new(base_url: &str, renderer: Arc<dyn Renderer>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            renderer,
            extractor: Arc::new(Extractor::new(base_url)?),
        })
    }

    pub(crate) fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Navigation errors are returned as is, there is no retry.
    pub async fn fetch_page(&self, keywords: &str, page: usize) -> Result<Vec<JobRecord>> {
        info_time!("Fetching page {page} for \"{keywords}\"");

        let url = search_url(&self.base_url, keywords, page);
        tracing::debug!(%url, "navigating");
        let html = self.renderer.render(&url).await?;

        let records = parse_html(self.extractor.clone(), html, Utc::now()).await?;
        info_time!("Found {} jobs on page {page}", records.len());
        Ok(records)
    }
}
