mod checkout_service;
mod errors;
mod key_locks;

pub use checkout_service::{
    OperationOutcome, ServiceDependencies, StateSnapshot, history_for, load_state, submit_operation,
};
pub use errors::{CheckoutApplicationError, Result};
pub use key_locks::KeyLocks;
