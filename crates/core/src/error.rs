//! Error types shared by the collaborator traits

use thiserror::Error;

/// Errors raised by pluggable collaborators (semantic classifier, sentiment analyzer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Semantic classifier error: {0}")]
    Semantic(String),

    #[error("Sentiment analysis error: {0}")]
    Sentiment(String),

    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
