use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, admin_login, admin_logs, admin_users, equipment_history, get_state, list_equipment,
    submit_operation,
};

/// Creates the API router
///
/// Kiosk endpoints:
/// - GET /api/state
/// - GET /api/equipment
/// - GET /api/equipment/:key/logs
/// - POST /api/operation
///
/// Admin endpoints (bearer token except login):
/// - POST /api/admin/login
/// - GET /api/admin/logs
/// - GET /api/admin/users
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/state", get(get_state))
        .route("/api/equipment", get(list_equipment))
        .route("/api/equipment/:key/logs", get(equipment_history))
        .route("/api/operation", post(submit_operation))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logs", get(admin_logs))
        .route("/api/admin/users", get(admin_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
