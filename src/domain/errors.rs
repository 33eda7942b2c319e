use thiserror::Error;

use super::EquipmentKey;

/// Why an operation was refused
///
/// Every rejection is terminal for that submission; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationRejection {
    /// A holder field was blank after trimming
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    /// The key is not in the catalog
    #[error("Unknown equipment: {0}")]
    UnknownEquipment(EquipmentKey),

    /// Borrow on an item that is already out
    #[error("{}", already_borrowed_message(.by_requester))]
    AlreadyBorrowed {
        /// The requester is the current holder
        by_requester: bool,
    },

    /// Return on an item nobody holds
    #[error("This item is not currently checked out by anyone")]
    NotBorrowed,

    /// Return by someone other than the holder
    #[error("Only the person who borrowed this item can return it")]
    WrongHolder,
}

fn already_borrowed_message(by_requester: &bool) -> &'static str {
    if *by_requester {
        "This item is already checked out under your name"
    } else {
        "This item is currently with someone else; only that person can return it"
    }
}

impl OperationRejection {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            OperationRejection::MissingField(_) => "MISSING_FIELD",
            OperationRejection::UnknownEquipment(_) => "UNKNOWN_EQUIPMENT",
            OperationRejection::AlreadyBorrowed { .. } => "ALREADY_BORROWED",
            OperationRejection::NotBorrowed => "NOT_BORROWED",
            OperationRejection::WrongHolder => "WRONG_HOLDER",
        }
    }
}
