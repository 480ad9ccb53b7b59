use thiserror::Error;

/// Faults that stop an exchange from happening or completing.
///
/// Server-reported failures are not faults: they come back as data
/// (`ErrorRecord` in a `DavReply`, or a non-success OCS `Meta`).
#[derive(Debug, Error)]
pub enum NextcloudError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request method: {0}")]
    InvalidMethod(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub type NextcloudResult<T> = Result<T, NextcloudError>;
