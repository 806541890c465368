use std::sync::Arc;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;
use url::Url;

use crate::model::JobRecord;
use crate::time::normalize;
use crate::{Error, Result};

const TILE: &str = r#"article[data-test="JobTile"]"#;
const HEADER: &str = "div.job-tile-header";
const PUBLISHED: &str = r#"small[data-test="job-pubilshed-date"] span"#;
const TITLE_LINK: &str = "h2.job-tile-title a";
const DETAILS: &str = r#"div[data-test="JobTileDetails"]"#;
const DESCRIPTION: &str = "div.air3-line-clamp p";
const SKILL: &str = r#"div[data-test="TokenClamp JobAttrs"] button[data-test="token"] span"#;

/// Maps job tiles of a rendered search results page to [`JobRecord`]s.
///
/// Selectors are parsed once up front, so extracting itself can't fail: anything missing
/// from a tile just leaves the matching field empty.
#[derive(Debug)]
pub struct Extractor {
    base_url: Url,
    tile: Selector,
    header: Selector,
    published: Selector,
    title_link: Selector,
    details: Selector,
    description: Selector,
    skill: Selector,
}

impl Extractor {
    /// `base_url` is the origin relative job links get resolved against.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            tile: create_selector(TILE)?,
            header: create_selector(HEADER)?,
            published: create_selector(PUBLISHED)?,
            title_link: create_selector(TITLE_LINK)?,
            details: create_selector(DETAILS)?,
            description: create_selector(DESCRIPTION)?,
            skill: create_selector(SKILL)?,
        })
    }

    /// Parses the page and extracts every tile, in document order.
    pub fn extract(&self, html: &str, now: DateTime<Utc>) -> Vec<JobRecord> {
        let doc = Html::parse_document(html);
        self.extract_document(&doc, now)
    }

    pub fn extract_document(&self, doc: &Html, now: DateTime<Utc>) -> Vec<JobRecord> {
        doc.select(&self.tile)
            .map(|tile| self.parse_tile(tile, now))
            .collect()
    }

    fn parse_tile(&self, tile: ElementRef, now: DateTime<Utc>) -> JobRecord {
        let mut record = JobRecord {
            posted_at: None,
            title: None,
            url: None,
            description: None,
            skills: Vec::new(),
        };

        if let Some(header) = tile.select(&self.header).next() {
            // The first span is the "Posted" label, the second the relative time.
            record.posted_at = header
                .select(&self.published)
                .nth(1)
                .map(|span| normalize(&element_text(span), now));

            if let Some(link) = header.select(&self.title_link).next() {
                record.title = Some(element_text(link));
                record.url = link.value().attr("href").and_then(|href| self.resolve(href));
            }
        }

        if let Some(details) = tile.select(&self.details).next() {
            record.description = details.select(&self.description).next().map(element_text);
            record.skills = details.select(&self.skill).map(element_text).collect();
        }

        record
    }

    /// Links leaving the base origin are dropped.
    fn resolve(&self, href: &str) -> Option<String> {
        let url = self.base_url.join(href.trim()).ok()?;
        (url.origin() == self.base_url.origin()).then(|| url.into())
    }
}

/// Runs the extraction on the blocking pool; the parsed document isn't `Send`.
pub(crate) async fn parse_html(
    extractor: Arc<Extractor>,
    html: String,
    now: DateTime<Utc>,
) -> Result<Vec<JobRecord>> {
    let records = spawn_blocking(move || extractor.extract(&html, now)).await?;
    Ok(records)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
