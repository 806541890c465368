use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Serialize, Serializer};

const NO_TIMESTAMP: &str = "N/A";
const NO_TITLE: &str = "No job title";
const NO_LINK: &str = "No relative link";
const NO_DESCRIPTION: &str = "No description";

/// A single listing scraped from a search results page.
///
/// `None` marks a field that could not be found in the tile. Skills are never missing,
/// a tile without skill tags just has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    #[serde(rename = "postingTimestamp", serialize_with = "ser_timestamp")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(rename = "jobTitle", serialize_with = "ser_title")]
    pub title: Option<String>,
    #[serde(rename = "jobHref", serialize_with = "ser_link")]
    pub url: Option<String>,
    #[serde(serialize_with = "ser_description")]
    pub description: Option<String>,
    pub skills: Vec<String>,
}

fn ser_timestamp<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(time) => s.serialize_i64(time.timestamp_millis()),
        None => s.serialize_str(NO_TIMESTAMP),
    }
}

fn ser_title<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(NO_TITLE))
}

fn ser_link<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(NO_LINK))
}

fn ser_description<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(NO_DESCRIPTION))
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let posted = self
            .posted_at
            .map(|t| t.with_timezone(&Local).format("%b %d, %Y").to_string())
            .unwrap_or_else(|| "Unknown Date".into());
        let skills = if self.skills.is_empty() {
            "None".to_string()
        } else {
            self.skills.join(", ")
        };

        writeln!(f, "Job Title: {}", self.title.as_deref().unwrap_or(NO_TITLE))?;
        writeln!(f, "Posted: {posted}")?;
        writeln!(f, "Description:\n{}", self.description.as_deref().unwrap_or(NO_DESCRIPTION))?;
        writeln!(f, "Skills: {skills}")?;
        write!(f, "Job Link: {}", self.url.as_deref().unwrap_or(NO_LINK))
    }
}

/// What the caller asked for: keywords and a 1-based result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub keywords: String,
    pub page: usize,
}

impl SearchContext {
    /// Missing page means the first page. Page 0 is treated as page 1.
    pub fn new(keywords: impl Into<String>, page: Option<usize>) -> Self {
        Self {
            keywords: keywords.into(),
            page: page.unwrap_or(1).max(1),
        }
    }
}

/// How many pages a search walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Exactly the requested page.
    #[default]
    SinglePage,
    /// From the requested page until a page comes back empty.
    AllPages,
}
