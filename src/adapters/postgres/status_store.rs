use crate::domain::{Action, EquipmentKey, StatusRecord, StudentId};
use crate::ports::status_store::{Result, StatusStore as StatusStoreTrait};
use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres, Row, postgres::PgRow};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Converts an `equipment_status` row into a key and its StatusRecord
///
/// `last_action` is stored as text and parsed back into an Action.
fn map_row_to_record(row: &PgRow) -> Result<(EquipmentKey, StatusRecord)> {
    let action_str: &str = row.get("last_action");
    let last_action = Action::from_str(action_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let key: String = row.get("key");
    let student_id: String = row.get("student_id");

    Ok((
        EquipmentKey::new(key),
        StatusRecord {
            last_action,
            full_name: row.get("full_name"),
            student_id: StudentId::new(student_id),
            phone: row.get("phone"),
            timestamp: row.get("timestamp"),
        },
    ))
}

/// Upsert one status row through any executor (pool or open transaction)
///
/// The new record replaces the previous one entirely.
pub(super) async fn upsert_record<'c, E>(
    executor: E,
    key: &EquipmentKey,
    record: &StatusRecord,
) -> sqlx::Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO equipment_status (key, last_action, full_name, student_id, phone, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (key)
        DO UPDATE SET
            last_action = EXCLUDED.last_action,
            full_name = EXCLUDED.full_name,
            student_id = EXCLUDED.student_id,
            phone = EXCLUDED.phone,
            timestamp = EXCLUDED.timestamp
        "#,
    )
    .bind(key.as_str())
    .bind(record.last_action.as_str())
    .bind(&record.full_name)
    .bind(record.student_id.as_str())
    .bind(&record.phone)
    .bind(&record.timestamp)
    .execute(executor)
    .await?;

    Ok(())
}

/// PostgreSQL implementation of StatusStore
///
/// One row per equipment key in `equipment_status`.
pub struct StatusStore {
    pool: PgPool,
}

impl StatusStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStoreTrait for StatusStore {
    async fn get(&self, key: &EquipmentKey) -> Result<Option<StatusRecord>> {
        let row = sqlx::query(
            r#"
            SELECT key, last_action, full_name, student_id, phone, timestamp
            FROM equipment_status
            WHERE key = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .as_ref()
            .map(map_row_to_record)
            .transpose()?
            .map(|(_, record)| record))
    }

    async fn snapshot(&self) -> Result<BTreeMap<EquipmentKey, StatusRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT key, last_action, full_name, student_id, phone, timestamp
            FROM equipment_status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_record).collect()
    }
}
