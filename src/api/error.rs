use crate::application::admin::AdminApplicationError;
use crate::application::checkout::CheckoutApplicationError;
use crate::domain::OperationRejection;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API error
///
/// Wraps the application errors and maps them to HTTP responses with an
/// `{"error": "..."}` body.
#[derive(Debug)]
pub enum ApiError {
    Checkout(CheckoutApplicationError),
    Admin(AdminApplicationError),
    /// Request body was not valid JSON for the endpoint
    InvalidBody(JsonRejection),
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::InvalidBody(err)
    }
}

impl From<CheckoutApplicationError> for ApiError {
    fn from(err: CheckoutApplicationError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<AdminApplicationError> for ApiError {
    fn from(err: AdminApplicationError) -> Self {
        ApiError::Admin(err)
    }
}

impl From<OperationRejection> for ApiError {
    fn from(err: OperationRejection) -> Self {
        ApiError::Checkout(err.into())
    }
}

fn rejection_status(rejection: &OperationRejection) -> StatusCode {
    match rejection {
        // 400 Bad Request - incomplete form
        OperationRejection::MissingField(_) => StatusCode::BAD_REQUEST,
        // 404 Not Found - no such item
        OperationRejection::UnknownEquipment(_) => StatusCode::NOT_FOUND,
        // 409 Conflict - transition not allowed from the item's current state
        OperationRejection::AlreadyBorrowed { .. }
        | OperationRejection::NotBorrowed
        | OperationRejection::WrongHolder => StatusCode::CONFLICT,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // 400 Bad Request - unreadable body (bad JSON, unknown action, ...)
            ApiError::InvalidBody(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }

            ApiError::Checkout(CheckoutApplicationError::Rejected(rejection)) => {
                (rejection_status(&rejection), rejection.to_string())
            }

            // 500 Internal Server Error - details go to the log only
            ApiError::Checkout(CheckoutApplicationError::StatusStoreError(e)) => {
                tracing::error!("Status store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read equipment status".to_string(),
                )
            }
            ApiError::Checkout(CheckoutApplicationError::JournalError(e)) => {
                tracing::error!("Operation journal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to record the operation".to_string(),
                )
            }
            ApiError::Checkout(CheckoutApplicationError::ActivityLogError(e))
            | ApiError::Admin(AdminApplicationError::ActivityLogError(e)) => {
                tracing::error!("Activity log error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read the activity log".to_string(),
                )
            }

            // 401 Unauthorized
            ApiError::Admin(err @ AdminApplicationError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Admin(err @ AdminApplicationError::InvalidToken(_)) => {
                tracing::debug!("Rejected admin token: {:?}", err);
                (StatusCode::UNAUTHORIZED, err.to_string())
            }

            ApiError::Admin(AdminApplicationError::InvalidExpiry(hours)) => {
                tracing::error!("Configured token lifetime is unusable: {} hours", hours);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to issue token".to_string(),
                )
            }
            ApiError::Admin(AdminApplicationError::TokenIssueError(e)) => {
                tracing::error!("Token issue error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to issue token".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
