//! Error types for the CreativeFuse client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while submitting an idea.
///
/// Every variant is terminal for the attempt that produced it. Nothing is
/// retried automatically; the caller may resubmit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required field was empty; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-2xx status. `detail` is shown verbatim.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// The request could not be completed at all
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not settle in time
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The caller cancelled the request before it settled
    #[error("Request cancelled")]
    Cancelled,

    /// Another request is still in flight
    #[error("A request is already in progress")]
    Busy,

    /// A success response did not have the expected shape
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error happened before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_is_prefixed() {
        let err = Error::Network("fetch failed".into());
        assert_eq!(err.to_string(), "Network error: fetch failed");
    }

    #[test]
    fn server_error_shows_detail_verbatim() {
        let err = Error::Server {
            status: 500,
            detail: "model unavailable".into(),
        };
        assert_eq!(err.to_string(), "model unavailable");
    }
}
