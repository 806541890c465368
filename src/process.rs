use std::sync::Arc;

use chrono::Local;

use crate::config::ScraperConfig;
use crate::model::{JobRecord, SearchContext, SearchMode};
use crate::request::{HttpRenderer, PageFetcher, Renderer};
use crate::{info_time, Result};

/// Entry point for searches. Owns the renderer for its whole lifetime.
///
/// Cloning is cheap and every clone shares the same renderer, so one `Scraper` created at
/// startup can serve concurrent callers. Call [`Scraper::close`] once when shutting down.
#[derive(Clone)]
pub struct Scraper {
    fetcher: PageFetcher,
    page_limit: usize,
}

impl Scraper {
    /// Sets up the HTTP renderer described by `config`.
    pub fn launch(config: &ScraperConfig) -> Result<Self> {
        let renderer = HttpRenderer::new(config)?;
        Self::with_renderer(config, Arc::new(renderer))
    }

    /// Uses `renderer` to load pages instead of the built in one.
    pub fn with_renderer(config: &ScraperConfig, renderer: Arc<dyn Renderer>) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(&config.base_url, renderer)?,
            page_limit: config.page_limit,
        })
    }

    pub async fn run(&self, ctx: &SearchContext, mode: SearchMode) -> Result<Vec<JobRecord>> {
        match mode {
            SearchMode::SinglePage => self.search_page(&ctx.keywords, Some(ctx.page)).await,
            SearchMode::AllPages => self.search(&ctx.keywords, ctx.page).await,
        }
    }

    /// Fetches a single page of results, the first one if `page` is `None`.
    pub async fn search_page(&self, keywords: &str, page: Option<usize>) -> Result<Vec<JobRecord>> {
        let ctx = SearchContext::new(keywords, page);
        self.fetcher.fetch_page(&ctx.keywords, ctx.page).await
    }

    /// Walks the result pages starting at `start_page` until one comes back empty
    /// (or the configured page limit is hit) and returns all jobs in page order.
    ///
    /// Fails as a whole if any page fails.
    pub async fn search(&self, keywords: &str, start_page: usize) -> Result<Vec<JobRecord>> {
        let start_time = Local::now();
        let start_page = start_page.max(1);

        // If the limit is 0 we keep going until an empty page.
        let page_range = if self.page_limit > 0 {
            start_page..=start_page.saturating_add(self.page_limit - 1)
        } else {
            start_page..=usize::MAX
        };

        let mut all_jobs = Vec::new();
        for page in page_range {
            let jobs = self.fetcher.fetch_page(keywords, page).await?;
            if jobs.is_empty() {
                info_time!("found EMPTY page {page}, stopping");
                break;
            }
            all_jobs.extend(jobs);
        }

        info_time!(start_time, "Total jobs found: {}", all_jobs.len());
        Ok(all_jobs)
    }

    pub async fn close(&self) {
        self.fetcher.renderer().close().await;
    }
}
