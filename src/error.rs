use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Page {url} responded with status {status}")]
    Status { status: u16, url: String },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
