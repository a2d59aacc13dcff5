//! Error types for the console SDK

use opsconsole_client::ClientError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum SdkError {
    /// Wiring bug (missing token, bad configuration); never absorbed into fallbacks
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Remote call failed or was rejected
    #[error("Backend error: {0}")]
    Backend(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Setting key not present in the projected field list
    #[error("Unknown setting: {0}")]
    UnknownField(String),

    /// Setting exists but cannot be edited
    #[error("Setting is read-only: {0}")]
    ReadOnlyField(String),

    /// Preference export produced by an incompatible version
    #[error("Unsupported preference export version {0}")]
    UnsupportedExport(u32),
}

impl SdkError {
    /// True for errors that indicate a wiring bug rather than a runtime condition
    pub fn is_precondition(&self) -> bool {
        matches!(self, SdkError::Precondition(_))
    }
}

impl From<ClientError> for SdkError {
    fn from(err: ClientError) -> Self {
        if err.is_precondition() {
            SdkError::Precondition(err.to_string())
        } else {
            SdkError::Backend(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}
