use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source API error: {0}")]
    Source(String),

    #[error("Rewrite error: {0}")]
    Rewrite(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("Sitemap error: {0}")]
    Sitemap(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
