use crate::domain::{EquipmentKey, LogEntry, StatusRecord};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Operation journal port
///
/// The only write path into the status store and the activity log. An
/// accepted operation lands as one unit: the log entry and the item's new
/// status record are both stored, or neither is.
#[async_trait]
pub trait OperationJournal: Send + Sync {
    /// Prepend `entry` to the activity log and overwrite the record for `key`.
    async fn record(&self, key: &EquipmentKey, record: StatusRecord, entry: LogEntry) -> Result<()>;
}
