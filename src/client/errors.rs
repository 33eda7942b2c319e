use thiserror::Error;

use crate::domain::OperationRejection;

/// Why a client-side action failed
#[derive(Debug, Error)]
pub enum SyncError {
    /// Refused locally before anything was sent
    #[error(transparent)]
    Rejected(#[from] OperationRejection),

    /// The server refused the request; carries the server's message
    #[error("{0}")]
    Remote(String),

    /// The server refused the admin token or credentials
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Network failure
    #[error("Could not reach the server")]
    Transport(#[source] reqwest::Error),

    /// The response body was not what the endpoint promises
    #[error("Invalid server response")]
    Decode(#[source] serde_json::Error),
}

impl SyncError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SyncError::Unauthorized(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
