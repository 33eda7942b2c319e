use thiserror::Error;

use crate::domain::OperationRejection;

/// Errors from the checkout application layer
#[derive(Debug, Error)]
pub enum CheckoutApplicationError {
    /// The operation failed validation or the transition table
    #[error(transparent)]
    Rejected(#[from] OperationRejection),

    /// StatusStore failure
    #[error("Status store error")]
    StatusStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// OperationJournal failure; nothing was stored
    #[error("Operation journal error")]
    JournalError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ActivityLog failure
    #[error("Activity log error")]
    ActivityLogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, CheckoutApplicationError>;
