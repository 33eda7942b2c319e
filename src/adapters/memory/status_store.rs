use crate::domain::{EquipmentKey, StatusRecord};
use crate::ports::status_store::{Result, StatusStore as StatusStoreTrait};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory implementation of StatusStore
///
/// Used when no database is configured and by the test suites.
#[derive(Debug, Default)]
pub struct StatusStore {
    pub(super) records: Mutex<BTreeMap<EquipmentKey, StatusRecord>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_records(records: impl IntoIterator<Item = (EquipmentKey, StatusRecord)>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
        }
    }
}

#[async_trait]
impl StatusStoreTrait for StatusStore {
    async fn get(&self, key: &EquipmentKey) -> Result<Option<StatusRecord>> {
        let records = self.records.lock().map_err(|e| e.to_string())?;
        Ok(records.get(key).cloned())
    }

    async fn snapshot(&self) -> Result<BTreeMap<EquipmentKey, StatusRecord>> {
        let records = self.records.lock().map_err(|e| e.to_string())?;
        Ok(records.clone())
    }
}
