use hypercat::v1::HypercatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalogue: {0}")]
    Catalog(#[from] HypercatError),

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("{url} answered {body:?}, expected {expected:?}")]
    UnexpectedResponse {
        url: String,
        expected: &'static str,
        body: String,
    },

    #[error("No document at {0}")]
    NotFound(String),
}
