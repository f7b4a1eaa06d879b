//! Client errors

use thiserror::Error;

/// Errors that can occur when talking to the events backend or auth API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl ClientError {
    /// The server answered with a non-success status
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// Status code of a rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sort a transport failure into timeout, unreachable or other
pub(crate) fn classify(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(err)
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection() {
        let err = ClientError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.is_rejection());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error 404: Not Found");

        assert!(!ClientError::Timeout.is_rejection());
        assert_eq!(ClientError::Unavailable.status(), None);
    }
}
