use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed returned status {status}")]
    Status { status: u16 },
}

pub type Result<T> = std::result::Result<T, FeedError>;
