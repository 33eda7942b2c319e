use crate::domain::{EquipmentKey, StatusRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Status store port
///
/// Maps each equipment key to its latest status record. A missing key means
/// the item has never been used. Records are written by `OperationJournal`.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Latest record for a key, if any operation was ever accepted for it.
    async fn get(&self, key: &EquipmentKey) -> Result<Option<StatusRecord>>;

    /// Every stored record, for the initial-state endpoint.
    async fn snapshot(&self) -> Result<BTreeMap<EquipmentKey, StatusRecord>>;
}
