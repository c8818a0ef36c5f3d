use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid gate URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} - {status}, {message}")]
    Http {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("error parsing JSON response: {0}")]
    Parse(String),
}
