use crate::domain::{self, Catalog, EquipmentKey, LogEntry, Operation, StatusRecord};
use crate::ports::*;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::{CheckoutApplicationError, Result};
use super::key_locks::KeyLocks;

/// Service dependencies
///
/// Plain data: every service function takes these explicitly.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub catalog: Arc<Catalog>,
    pub status_store: Arc<dyn StatusStore>,
    pub activity_log: Arc<dyn ActivityLog>,
    pub journal: Arc<dyn OperationJournal>,
    pub key_locks: Arc<KeyLocks>,
}

impl ServiceDependencies {
    pub fn new(
        catalog: Catalog,
        status_store: Arc<dyn StatusStore>,
        activity_log: Arc<dyn ActivityLog>,
        journal: Arc<dyn OperationJournal>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            status_store,
            activity_log,
            journal,
            key_locks: Arc::new(KeyLocks::new()),
        }
    }
}

/// Full server state as served on page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub equipment_status: BTreeMap<EquipmentKey, StatusRecord>,
    /// Newest first
    pub logs: Vec<LogEntry>,
}

/// Authoritative result of an accepted operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub record: StatusRecord,
    pub entry: LogEntry,
}

/// Load every status record and the full log
pub async fn load_state(deps: &ServiceDependencies) -> Result<StateSnapshot> {
    let equipment_status = deps
        .status_store
        .snapshot()
        .await
        .map_err(CheckoutApplicationError::StatusStoreError)?;

    let logs = deps
        .activity_log
        .list()
        .await
        .map_err(CheckoutApplicationError::ActivityLogError)?;

    Ok(StateSnapshot {
        equipment_status,
        logs,
    })
}

/// Submit a borrow/return operation (authoritative gate)
///
/// Business rules:
/// - name, student ID and phone are required (trimmed)
/// - the key must be in the catalog
/// - the per-item transition table (see `domain::checkout::check_transition`)
///
/// The item's key lock is held from reading the current record until both
/// writes finish, so concurrent requests for one item cannot both pass the
/// check.
///
/// # Consistency
///
/// The log entry and the status record are written through the journal as
/// one unit. On failure neither is stored and the error is returned; nothing
/// is retried.
pub async fn submit_operation(
    deps: &ServiceDependencies,
    op: Operation,
    at: DateTime<Utc>,
) -> Result<OperationOutcome> {
    // 1. Input validation
    let op = op.normalized()?;
    let equipment_name = deps
        .catalog
        .find(&op.key)
        .map(|item| item.name.clone())
        .ok_or_else(|| domain::OperationRejection::UnknownEquipment(op.key.clone()))?;

    // 2. Serialize against other requests for this item
    let _guard = deps.key_locks.lock(&op.key).await;

    // 3. Current state
    let current = deps
        .status_store
        .get(&op.key)
        .await
        .map_err(CheckoutApplicationError::StatusStoreError)?;

    // 4. Pure transition
    let (record, entry) =
        domain::checkout::apply(&op, &equipment_name, current.as_ref(), at).inspect_err(|e| {
            tracing::info!(key = %op.key, action = %op.action, reason = e.code(), "Operation rejected");
        })?;

    // 5. Persist
    deps.journal
        .record(&op.key, record.clone(), entry.clone())
        .await
        .map_err(CheckoutApplicationError::JournalError)?;

    tracing::info!(key = %op.key, action = %op.action, "Operation accepted");

    Ok(OperationOutcome { record, entry })
}

/// Log entries for one item, newest first
pub async fn history_for(
    deps: &ServiceDependencies,
    key: &EquipmentKey,
) -> Result<Vec<LogEntry>> {
    if !deps.catalog.contains(key) {
        return Err(domain::OperationRejection::UnknownEquipment(key.clone()).into());
    }

    deps.activity_log
        .list_for_key(key)
        .await
        .map_err(CheckoutApplicationError::ActivityLogError)
}
