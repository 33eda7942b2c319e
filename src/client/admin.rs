use crate::domain::{Borrower, LogEntry};
use crate::view::{self, CsvExport};
use std::path::PathBuf;
use std::sync::Mutex;

use super::errors::{Result, SyncError};
use super::remote::AdminRemote;

// ============================================================================
// Credential storage
// ============================================================================

/// Where the admin ID token survives between sessions
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> std::io::Result<()>;

    fn clear(&self) -> std::io::Result<()>;
}

/// Token held for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Token kept in a file, one line
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for FileCredentials {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|content| content.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Admin dashboard state
///
/// Logged in exactly when a token is held. Any request the server refuses as
/// unauthorized drops the token from both the session and the store.
pub struct AdminSession<R, S> {
    remote: R,
    credentials: S,
    token: Option<String>,
    logs: Vec<LogEntry>,
    users: Vec<Borrower>,
}

impl<R: AdminRemote, S: CredentialStore> AdminSession<R, S> {
    pub fn new(remote: R, credentials: S) -> Self {
        Self {
            remote,
            credentials,
            token: None,
            logs: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Resume from a stored token, loading data if one is found
    ///
    /// Returns whether the session ended up logged in.
    pub async fn bootstrap(&mut self) -> Result<bool> {
        let Some(token) = self.credentials.load() else {
            return Ok(false);
        };

        self.token = Some(token);
        match self.load_data().await {
            Ok(()) => Ok(true),
            Err(e) if e.is_unauthorized() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Exchange credentials for a token, store it, and load data
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.remote.login(email, password).await?;

        if let Err(e) = self.credentials.save(&token) {
            tracing::warn!("Failed to store admin token: {}", e);
        }
        self.token = Some(token);

        self.load_data().await
    }

    pub fn logout(&mut self) {
        self.forget_token();
        self.logs.clear();
        self.users.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch logs and users together
    pub async fn load_data(&mut self) -> Result<()> {
        let Some(token) = self.token.clone() else {
            return Err(SyncError::Unauthorized("Not logged in".to_string()));
        };

        let fetched = futures::try_join!(
            self.remote.admin_logs(&token),
            self.remote.admin_users(&token)
        );

        match fetched {
            Ok((logs, users)) => {
                tracing::debug!(logs = logs.len(), users = users.len(), "Loaded admin data");
                self.logs = logs;
                self.users = users;
                Ok(())
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::info!("Admin token refused, logging out");
                    self.logout();
                }
                Err(e)
            }
        }
    }

    fn forget_token(&mut self) {
        self.token = None;
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("Failed to clear admin token: {}", e);
        }
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn users(&self) -> &[Borrower] {
        &self.users
    }

    pub fn export_logs(&self) -> CsvExport {
        view::export_logs(&self.logs)
    }

    pub fn export_users(&self) -> CsvExport {
        view::export_users(&self.users)
    }
}
