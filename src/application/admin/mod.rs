mod admin_service;
mod errors;

pub use admin_service::{AdminClaims, borrowers_from, list_logs, list_users, login, verify_token};
pub use errors::{AdminApplicationError, Result};
