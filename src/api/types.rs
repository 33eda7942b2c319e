use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{
    Action, Borrower, EquipmentItem, EquipmentKey, LogEntry, Operation, StatusRecord, StudentId,
};

/// GET /api/state response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub equipment_status: BTreeMap<EquipmentKey, StatusRecord>,
    pub logs: Vec<LogEntry>,
}

/// POST /api/operation request
///
/// Holder fields default to empty so a missing field is reported as a
/// validation error rather than a body rejection. Extra display fields the
/// kiosk sends (`equipmentName`, `equipmentId`, `location`) are ignored; the
/// server resolves them from its own catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub key: EquipmentKey,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub phone: String,
    pub action: Action,
}

impl OperationRequest {
    pub fn to_command(&self) -> Operation {
        Operation {
            key: self.key.clone(),
            full_name: self.full_name.clone(),
            student_id: StudentId::new(self.student_id.clone()),
            phone: self.phone.clone(),
            action: self.action,
        }
    }
}

impl From<&Operation> for OperationRequest {
    fn from(op: &Operation) -> Self {
        Self {
            key: op.key.clone(),
            full_name: op.full_name.clone(),
            student_id: op.student_id.as_str().to_string(),
            phone: op.phone.clone(),
            action: op.action,
        }
    }
}

/// POST /api/operation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub equipment_status_item: StatusRecord,
    pub log_entry: LogEntry,
}

/// GET /api/equipment/:key/logs and GET /api/admin/logs response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
}

/// GET /api/equipment response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentResponse {
    pub equipment: Vec<EquipmentItem>,
}

/// POST /api/admin/login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/admin/login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id_token: String,
}

/// GET /api/admin/users response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<Borrower>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
