use crate::domain::{EquipmentKey, LogEntry, StatusRecord};
use crate::ports::operation_journal::{OperationJournal as OperationJournalTrait, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::{ActivityLog, StatusStore};

/// In-memory implementation of OperationJournal
///
/// Writes into the given memory stores. Both locks are taken before either
/// write, so readers never see the entry without the record.
#[derive(Debug, Clone)]
pub struct OperationJournal {
    status_store: Arc<StatusStore>,
    activity_log: Arc<ActivityLog>,
}

impl OperationJournal {
    pub fn new(status_store: Arc<StatusStore>, activity_log: Arc<ActivityLog>) -> Self {
        Self {
            status_store,
            activity_log,
        }
    }
}

#[async_trait]
impl OperationJournalTrait for OperationJournal {
    async fn record(&self, key: &EquipmentKey, record: StatusRecord, entry: LogEntry) -> Result<()> {
        let mut entries = self.activity_log.entries.lock().map_err(|e| e.to_string())?;
        let mut records = self.status_store.records.lock().map_err(|e| e.to_string())?;

        entries.push_front(entry);
        records.insert(key.clone(), record);
        Ok(())
    }
}
