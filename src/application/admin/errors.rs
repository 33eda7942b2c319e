use thiserror::Error;

/// Errors from the admin application layer
#[derive(Debug, Error)]
pub enum AdminApplicationError {
    /// Email/password did not match, or admin login is not configured
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired or for another subject
    #[error("Invalid or expired token")]
    InvalidToken(#[source] Option<jsonwebtoken::errors::Error>),

    /// Configured token lifetime is not a usable positive duration
    #[error("Invalid token lifetime: {0} hours")]
    InvalidExpiry(i64),

    /// Signing a new token failed
    #[error("Failed to issue token")]
    TokenIssueError(#[source] jsonwebtoken::errors::Error),

    /// ActivityLog failure
    #[error("Activity log error")]
    ActivityLogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, AdminApplicationError>;
