use crate::domain::{Action, EquipmentKey, LogEntry, LogEntryId, StudentId};
use crate::ports::activity_log::{ActivityLog as ActivityLogTrait, Result};
use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres, Row, postgres::PgRow};
use std::str::FromStr;

fn map_row_to_entry(row: &PgRow) -> Result<LogEntry> {
    let action_str: &str = row.get("action");
    let action = Action::from_str(action_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let key: String = row.get("key");
    let student_id: String = row.get("student_id");

    Ok(LogEntry {
        id: LogEntryId::from_uuid(row.get("id")),
        key: EquipmentKey::new(key),
        equipment_name: row.get("equipment_name"),
        full_name: row.get("full_name"),
        student_id: (!student_id.is_empty()).then(|| StudentId::new(student_id)),
        phone: row.get("phone"),
        action,
        timestamp: row.get("timestamp"),
    })
}

/// Insert one log row through any executor (pool or open transaction)
pub(super) async fn insert_entry<'c, E>(executor: E, entry: &LogEntry) -> sqlx::Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let student_id = entry
        .student_id
        .as_ref()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();

    sqlx::query(
        r#"
        INSERT INTO activity_log (
            id,
            key,
            equipment_name,
            full_name,
            student_id,
            phone,
            action,
            timestamp
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(entry.id.value())
    .bind(entry.key.as_str())
    .bind(&entry.equipment_name)
    .bind(&entry.full_name)
    .bind(student_id)
    .bind(&entry.phone)
    .bind(entry.action.as_str())
    .bind(&entry.timestamp)
    .execute(executor)
    .await?;

    Ok(())
}

/// PostgreSQL implementation of ActivityLog
///
/// Rows are append-only; `seq` (BIGSERIAL) gives insertion order and the
/// newest-first view is `ORDER BY seq DESC`.
pub struct ActivityLog {
    pool: PgPool,
}

impl ActivityLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogTrait for ActivityLog {
    async fn list(&self) -> Result<Vec<LogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, key, equipment_name, full_name, student_id, phone, action, timestamp
            FROM activity_log
            ORDER BY seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_entry).collect()
    }

    async fn list_for_key(&self, key: &EquipmentKey) -> Result<Vec<LogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, key, equipment_name, full_name, student_id, phone, action, timestamp
            FROM activity_log
            WHERE key = $1
            ORDER BY seq DESC
            "#,
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_entry).collect()
    }
}
