use crate::domain::{Borrower, EquipmentKey, LogEntry, Operation, StatusRecord};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::BTreeMap;

use super::errors::{Result, SyncError};
use crate::api::types::{LoginRequest, OperationRequest};

// ============================================================================
// Wire types (tolerant of missing or null fields)
// ============================================================================

/// Server state as returned by `GET /api/state`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteState {
    #[serde(default)]
    equipment_status: Option<BTreeMap<EquipmentKey, StatusRecord>>,
    #[serde(default)]
    logs: Option<Vec<LogEntry>>,
}

impl RemoteState {
    pub fn new(equipment_status: BTreeMap<EquipmentKey, StatusRecord>, logs: Vec<LogEntry>) -> Self {
        Self {
            equipment_status: Some(equipment_status),
            logs: Some(logs),
        }
    }

    pub fn into_parts(self) -> (BTreeMap<EquipmentKey, StatusRecord>, Vec<LogEntry>) {
        (
            self.equipment_status.unwrap_or_default(),
            self.logs.unwrap_or_default(),
        )
    }
}

/// Server echo of an accepted operation; either half may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReply {
    #[serde(default)]
    pub equipment_status_item: Option<StatusRecord>,
    #[serde(default)]
    pub log_entry: Option<LogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginReply {
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LogsReply {
    #[serde(default)]
    logs: Option<Vec<LogEntry>>,
}

#[derive(Debug, Deserialize)]
struct UsersReply {
    #[serde(default)]
    users: Option<Vec<Borrower>>,
}

// ============================================================================
// Ports
// ============================================================================

/// Kiosk side of the authoritative service
#[async_trait]
pub trait KioskRemote: Send + Sync {
    /// Current status map and log, newest first.
    async fn fetch_state(&self) -> Result<RemoteState>;

    /// Submit an operation; the server decides.
    async fn submit_operation(&self, op: &Operation) -> Result<SubmitReply>;
}

/// Admin side of the authoritative service
#[async_trait]
pub trait AdminRemote: Send + Sync {
    /// Exchange credentials for an ID token.
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    async fn admin_logs(&self, token: &str) -> Result<Vec<LogEntry>>;

    async fn admin_users(&self, token: &str) -> Result<Vec<Borrower>>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// reqwest-backed client for the tracker server
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// `base_url` is the server root, e.g. `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body
    ///
    /// An empty body reads as `{}`. Non-success statuses surface the body's
    /// `error` field, or `HTTP <status>` when there is none.
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(SyncError::Transport)?;
        let status = response.status();
        let text = response.text().await.map_err(SyncError::Transport)?;

        let body: serde_json::Value = if text.trim().is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => return Err(SyncError::Decode(e)),
                Err(_) => serde_json::json!({ "error": "Invalid server response" }),
            }
        };

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

            tracing::debug!(status = status.as_u16(), %message, "Request refused");

            return Err(if status == StatusCode::UNAUTHORIZED {
                SyncError::Unauthorized(message)
            } else {
                SyncError::Remote(message)
            });
        }

        serde_json::from_value(body).map_err(SyncError::Decode)
    }
}

#[async_trait]
impl KioskRemote for HttpRemote {
    async fn fetch_state(&self) -> Result<RemoteState> {
        self.call(self.client.get(self.url("/api/state"))).await
    }

    async fn submit_operation(&self, op: &Operation) -> Result<SubmitReply> {
        let body = OperationRequest::from(op);
        self.call(self.client.post(self.url("/api/operation")).json(&body))
            .await
    }
}

#[async_trait]
impl AdminRemote for HttpRemote {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let reply: LoginReply = self
            .call(self.client.post(self.url("/api/admin/login")).json(&body))
            .await?;

        reply
            .id_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SyncError::Remote("Missing token".to_string()))
    }

    async fn admin_logs(&self, token: &str) -> Result<Vec<LogEntry>> {
        let reply: LogsReply = self
            .call(self.client.get(self.url("/api/admin/logs")).bearer_auth(token))
            .await?;
        Ok(reply.logs.unwrap_or_default())
    }

    async fn admin_users(&self, token: &str) -> Result<Vec<Borrower>> {
        let reply: UsersReply = self
            .call(self.client.get(self.url("/api/admin/users")).bearer_auth(token))
            .await?;
        Ok(reply.users.unwrap_or_default())
    }
}
