use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobscrap::request::{search_url, Renderer};
use jobscrap::{Error, Result, Scraper, ScraperConfig, SearchContext, SearchMode, BASE_URL};

/// Serves canned pages; unknown URLs get a page without tiles.
#[derive(Default)]
struct FakeRenderer {
    pages: HashMap<String, String>,
    failing: Vec<String>,
    visited: Mutex<Vec<String>>,
    closed: Mutex<bool>,
}

impl FakeRenderer {
    fn page(mut self, keywords: &str, page: usize, titles: &[&str]) -> Self {
        self.pages
            .insert(search_url(BASE_URL, keywords, page), results_page(titles));
        self
    }

    fn failing(mut self, keywords: &str, page: usize) -> Self {
        self.failing.push(search_url(BASE_URL, keywords, page));
        self
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        self.visited.lock().unwrap().push(url.to_string());
        if self.failing.iter().any(|u| u == url) {
            return Err(Error::Status {
                status: 503,
                url: url.to_string(),
            });
        }
        Ok(self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| results_page(&[])))
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

fn results_page(titles: &[&str]) -> String {
    let tiles: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<article data-test="JobTile">
                     <div class="job-tile-header">
                       <small data-test="job-pubilshed-date"><span>Posted</span><span>{i} minutes ago</span></small>
                       <h2 class="job-tile-title"><a href="/jobs/{i}">{title}</a></h2>
                     </div>
                   </article>"#
            )
        })
        .collect();
    format!("<html><body><main>{tiles}</main></body></html>")
}

fn scraper(renderer: Arc<FakeRenderer>, page_limit: usize) -> Scraper {
    let config = ScraperConfig {
        page_limit,
        ..ScraperConfig::default()
    };
    Scraper::with_renderer(&config, renderer).unwrap()
}

fn titles(jobs: &[jobscrap::JobRecord]) -> Vec<&str> {
    jobs.iter().filter_map(|j| j.title.as_deref()).collect()
}

#[tokio::test]
async fn single_page_fetches_exactly_one_page() {
    let renderer = Arc::new(
        FakeRenderer::default()
            .page("developer", 1, &["a", "b"])
            .page("developer", 2, &["c"]),
    );
    let jobs = scraper(renderer.clone(), 0)
        .search_page("developer", None)
        .await
        .unwrap();

    assert_eq!(titles(&jobs), vec!["a", "b"]);
    assert_eq!(
        renderer.visited(),
        vec!["https://www.upwork.com/nx/search/jobs/?nbs=1&proposals=0-4,5-9,10-14,15-19&q=developer&page=1"]
    );
    assert_eq!(jobs[1].url.as_deref(), Some("https://www.upwork.com/jobs/1"));
}

#[tokio::test]
async fn all_pages_stops_on_empty_page() {
    let renderer = Arc::new(
        FakeRenderer::default()
            .page("rust", 1, &["a", "b"])
            .page("rust", 2, &["c"])
            .page("rust", 4, &["never"]),
    );
    let jobs = scraper(renderer.clone(), 0).search("rust", 1).await.unwrap();

    assert_eq!(titles(&jobs), vec!["a", "b", "c"]);
    assert_eq!(renderer.visited().len(), 3);
}

#[tokio::test]
async fn all_pages_starts_at_requested_page() {
    let renderer = Arc::new(
        FakeRenderer::default()
            .page("rust", 1, &["skipped"])
            .page("rust", 2, &["b"])
            .page("rust", 3, &["c"]),
    );
    let ctx = SearchContext::new("rust", Some(2));
    let jobs = scraper(renderer, 0)
        .run(&ctx, SearchMode::AllPages)
        .await
        .unwrap();

    assert_eq!(titles(&jobs), vec!["b", "c"]);
}

#[tokio::test]
async fn page_limit_caps_the_loop() {
    let renderer = Arc::new(
        FakeRenderer::default()
            .page("go", 1, &["a"])
            .page("go", 2, &["b"])
            .page("go", 3, &["c"]),
    );
    let jobs = scraper(renderer.clone(), 2).search("go", 1).await.unwrap();

    assert_eq!(titles(&jobs), vec!["a", "b"]);
    assert_eq!(renderer.visited().len(), 2);
}

#[tokio::test]
async fn failed_page_fails_the_whole_search() {
    let renderer = Arc::new(
        FakeRenderer::default()
            .page("go", 1, &["a"])
            .failing("go", 2),
    );
    let err = scraper(renderer, 0).search("go", 1).await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 503, .. }));
}

#[tokio::test]
async fn empty_first_page_is_not_an_error() {
    let renderer = Arc::new(FakeRenderer::default());
    let ctx = SearchContext::new("nothing", None);
    let jobs = scraper(renderer, 0)
        .run(&ctx, SearchMode::SinglePage)
        .await
        .unwrap();

    assert!(jobs.is_empty());
}

#[tokio::test]
async fn clones_share_one_renderer() {
    let renderer = Arc::new(FakeRenderer::default().page("a", 1, &["x"]));
    let first = scraper(renderer.clone(), 0);
    let second = first.clone();

    let (a, b) = tokio::join!(first.search_page("a", None), second.search_page("a", None));
    assert_eq!(titles(&a.unwrap()), titles(&b.unwrap()));
    assert_eq!(renderer.visited().len(), 2);

    second.close().await;
    assert!(*renderer.closed.lock().unwrap());
}
