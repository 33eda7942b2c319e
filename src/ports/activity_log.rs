use crate::domain::{EquipmentKey, LogEntry};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Activity log port
///
/// Append-only history of accepted operations, read newest first.
/// Entries are never modified or removed; new ones arrive through
/// `OperationJournal`.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<LogEntry>>;

    /// Entries for one item, newest first.
    async fn list_for_key(&self, key: &EquipmentKey) -> Result<Vec<LogEntry>>;
}
