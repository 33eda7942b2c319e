use crate::domain::{EquipmentKey, LogEntry, StatusRecord};
use crate::ports::operation_journal::{OperationJournal as OperationJournalTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::{activity_log::insert_entry, status_store::upsert_record};

/// PostgreSQL implementation of OperationJournal
///
/// The log insert and the status upsert share one transaction; a failure in
/// either rolls back both.
pub struct OperationJournal {
    pool: PgPool,
}

impl OperationJournal {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperationJournalTrait for OperationJournal {
    async fn record(&self, key: &EquipmentKey, record: StatusRecord, entry: LogEntry) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        insert_entry(&mut *tx, &entry).await?;
        upsert_record(&mut *tx, key, &record).await?;

        tx.commit().await?;
        Ok(())
    }
}
