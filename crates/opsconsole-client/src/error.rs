//! Error types for the console client

use thiserror::Error;

/// Console client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token available; the request was never sent
    #[error("No authentication token available")]
    MissingToken,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True for wiring bugs that must not be absorbed into fallbacks.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::MissingToken | ClientError::Config(_))
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(ClientError::MissingToken.is_precondition());
        assert!(ClientError::Config("bad".into()).is_precondition());
        assert!(!ClientError::Server {
            status: 502,
            message: "bad gateway".into()
        }
        .is_precondition());
    }

    #[test]
    fn test_server_status() {
        let err = ClientError::Server {
            status: 403,
            message: "forbidden".into(),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(ClientError::MissingToken.status(), None);
    }
}
