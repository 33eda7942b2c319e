use crate::domain::{EquipmentKey, LogEntry};
use crate::ports::activity_log::{ActivityLog as ActivityLogTrait, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory implementation of ActivityLog
///
/// Front of the deque is the newest entry.
#[derive(Debug, Default)]
pub struct ActivityLog {
    pub(super) entries: Mutex<VecDeque<LogEntry>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLogTrait for ActivityLog {
    async fn list(&self) -> Result<Vec<LogEntry>> {
        let entries = self.entries.lock().map_err(|e| e.to_string())?;
        Ok(entries.iter().cloned().collect())
    }

    async fn list_for_key(&self, key: &EquipmentKey) -> Result<Vec<LogEntry>> {
        let entries = self.entries.lock().map_err(|e| e.to_string())?;
        Ok(entries.iter().filter(|e| &e.key == key).cloned().collect())
    }
}
