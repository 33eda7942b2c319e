use crate::application::{
    admin,
    checkout::{self, ServiceDependencies},
};
use crate::config::AdminConfig;
use crate::domain::EquipmentKey;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    auth::AdminSession,
    error::ApiError,
    types::{
        EquipmentResponse, LoginRequest, LoginResponse, LogsResponse, OperationRequest,
        OperationResponse, StateResponse, UsersResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub admin: AdminConfig,
}

// ============================================================================
// Kiosk handlers
// ============================================================================

/// GET /api/state - every status record and the public activity log
///
/// Log entries are served without student IDs.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = checkout::load_state(&state.service_deps).await?;

    Ok(Json(StateResponse {
        equipment_status: snapshot.equipment_status,
        logs: snapshot.logs.iter().map(|entry| entry.redacted()).collect(),
    }))
}

/// GET /api/equipment - the fixed catalog
pub async fn list_equipment(State(state): State<Arc<AppState>>) -> Json<EquipmentResponse> {
    Json(EquipmentResponse {
        equipment: state.service_deps.catalog.items().to_vec(),
    })
}

/// GET /api/equipment/:key/logs - public history of one item
pub async fn equipment_history(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<LogsResponse>, ApiError> {
    let logs = checkout::history_for(&state.service_deps, &EquipmentKey::new(key)).await?;

    Ok(Json(LogsResponse {
        logs: logs.iter().map(|entry| entry.redacted()).collect(),
    }))
}

/// POST /api/operation - borrow or return an item
///
/// Enforced rules:
/// - name, student ID and phone are present
/// - the item exists
/// - borrow only when available; return only by the current holder
pub async fn submit_operation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OperationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OperationResponse>), ApiError> {
    let Json(req) = body?;
    let outcome =
        checkout::submit_operation(&state.service_deps, req.to_command(), chrono::Utc::now())
            .await?;

    let response = OperationResponse {
        equipment_status_item: outcome.record,
        log_entry: outcome.entry,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// Admin handlers
// ============================================================================

/// POST /api/admin/login - exchange credentials for an ID token
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;
    let id_token = admin::login(&state.admin, &req.email, &req.password, chrono::Utc::now())?;
    Ok(Json(LoginResponse { id_token }))
}

/// GET /api/admin/logs - full log including student IDs
pub async fn admin_logs(
    AdminSession(claims): AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LogsResponse>, ApiError> {
    tracing::debug!(admin = %claims.sub, "Listing admin logs");
    let logs = admin::list_logs(&state.service_deps).await?;
    Ok(Json(LogsResponse { logs }))
}

/// GET /api/admin/users - distinct borrowers
pub async fn admin_users(
    AdminSession(claims): AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersResponse>, ApiError> {
    tracing::debug!(admin = %claims.sub, "Listing admin users");
    let users = admin::list_users(&state.service_deps).await?;
    Ok(Json(UsersResponse { users }))
}
