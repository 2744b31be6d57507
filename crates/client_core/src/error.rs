use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("delete index {index} is out of range for a list of {len} artists")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("save request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("save rejected with HTTP status {status}")]
    Status { status: u16 },
    #[error("save rejected: {0}")]
    Rejected(#[from] ApiError),
    #[error("unreadable save response: {0}")]
    Decode(String),
    #[error("save transport is unavailable")]
    TransportUnavailable,
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
