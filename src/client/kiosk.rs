use crate::domain::{
    Catalog, EquipmentKey, LogEntry, LogEntryId, Operation, StatusRecord, checkout,
};
use crate::view::{self, CardView, LogFilter, LogTableView, TimestampFormat};
use chrono::Utc;

use super::cache::{LogCache, StatusCache};
use super::errors::Result;
use super::remote::KioskRemote;

/// What a successful submission left in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub record: StatusRecord,
    pub entry: LogEntry,
    /// The server echoed the status record
    pub record_confirmed: bool,
    /// The server echoed the log entry
    pub entry_confirmed: bool,
}

/// Local guess applied while a submission is in flight
#[derive(Debug)]
struct Tentative {
    key: EquipmentKey,
    previous: Option<StatusRecord>,
    record: StatusRecord,
    entry: LogEntry,
}

impl Tentative {
    fn entry_id(&self) -> LogEntryId {
        self.entry.id
    }
}

/// Kiosk application state for one session
///
/// Owns the catalog and cached copies of the server's status store and
/// activity log. The server is the source of truth; the cache is reloaded by
/// `load` and updated by `submit`.
pub struct KioskSession<R> {
    remote: R,
    catalog: Catalog,
    status: StatusCache,
    log: LogCache,
}

impl<R: KioskRemote> KioskSession<R> {
    /// Session with empty state; call `load` to fetch the server's.
    pub fn new(remote: R, catalog: Catalog) -> Self {
        Self {
            remote,
            catalog,
            status: StatusCache::default(),
            log: LogCache::default(),
        }
    }

    /// Replace the cache with the server's current state
    ///
    /// On failure the error is returned for the caller to surface and the
    /// session continues with empty state.
    pub async fn load(&mut self) -> Result<()> {
        match self.remote.fetch_state().await {
            Ok(state) => {
                let (status, logs) = state.into_parts();
                tracing::debug!(records = status.len(), logs = logs.len(), "Loaded state");
                self.status = StatusCache::new(status);
                self.log = LogCache::new(logs);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load state: {}", e);
                self.status = StatusCache::default();
                self.log = LogCache::default();
                Err(e)
            }
        }
    }

    /// Submit a borrow/return
    ///
    /// 1. Validate locally (fields, catalog, transition table); a rejection
    ///    returns before anything is sent.
    /// 2. Tentatively apply a locally built record and log entry.
    /// 3. Send to the server.
    /// 4. On success, confirm: the server's record and entry replace the guess
    ///    wherever it returned them. On failure, revert: the previous record is
    ///    restored and the tentative entry dropped.
    pub async fn submit(&mut self, op: Operation) -> Result<Submitted> {
        let current = self.status.get(&op.key).cloned();
        let (op, item) = checkout::validate(&self.catalog, op, current.as_ref())?;
        let equipment_name = item.name.clone();

        let (record, entry) = checkout::apply(&op, &equipment_name, current.as_ref(), Utc::now())?;
        let tentative = self.apply_tentative(op.key.clone(), record, entry);

        match self.remote.submit_operation(&op).await {
            Ok(reply) => Ok(self.confirm(tentative, reply.equipment_status_item, reply.log_entry)),
            Err(e) => {
                tracing::warn!(key = %op.key, "Submission failed: {}", e);
                self.revert(tentative);
                Err(e)
            }
        }
    }

    fn apply_tentative(
        &mut self,
        key: EquipmentKey,
        record: StatusRecord,
        entry: LogEntry,
    ) -> Tentative {
        let previous = self.status.set(key.clone(), record.clone());
        self.log.prepend(entry.clone());

        Tentative {
            key,
            previous,
            record,
            entry,
        }
    }

    fn confirm(
        &mut self,
        tentative: Tentative,
        server_record: Option<StatusRecord>,
        server_entry: Option<LogEntry>,
    ) -> Submitted {
        let entry_id = tentative.entry_id();
        let record_confirmed = server_record.is_some();
        let entry_confirmed = server_entry.is_some();

        let record = match server_record {
            Some(record) => {
                if record != tentative.record {
                    tracing::debug!(key = %tentative.key, "Server record differs from local guess");
                }
                self.status.set(tentative.key.clone(), record.clone());
                record
            }
            None => tentative.record,
        };

        let entry = match server_entry {
            Some(entry) => {
                self.log.replace_front(entry_id, entry.clone());
                entry
            }
            None => tentative.entry,
        };

        Submitted {
            record,
            entry,
            record_confirmed,
            entry_confirmed,
        }
    }

    fn revert(&mut self, tentative: Tentative) {
        let entry_id = tentative.entry_id();
        self.status.restore(&tentative.key, tentative.previous);
        self.log.remove_front(entry_id);
    }

    // ------------------------------------------------------------------------
    // Read access and views
    // ------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self, key: &EquipmentKey) -> Option<&StatusRecord> {
        self.status.get(key)
    }

    pub fn log(&self) -> &LogCache {
        &self.log
    }

    pub fn cards(&self, format: &TimestampFormat) -> Vec<CardView> {
        view::render_cards(&self.catalog, self.status.records(), format)
    }

    /// Card for one item, for repainting after a submission
    pub fn card(&self, key: &EquipmentKey, format: &TimestampFormat) -> Option<CardView> {
        self.catalog
            .find(key)
            .map(|item| view::render_card(item, self.status.get(key), format))
    }

    pub fn log_table(&self, filter: &LogFilter, format: &TimestampFormat) -> LogTableView {
        view::render_log_table(&self.log, filter, format)
    }
}
