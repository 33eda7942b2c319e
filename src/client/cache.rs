use crate::domain::{EquipmentKey, LogEntry, LogEntryId, StatusRecord};
use std::collections::{BTreeMap, VecDeque};

/// Session-local copy of the status store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCache {
    records: BTreeMap<EquipmentKey, StatusRecord>,
}

impl StatusCache {
    pub fn new(records: BTreeMap<EquipmentKey, StatusRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, key: &EquipmentKey) -> Option<&StatusRecord> {
        self.records.get(key)
    }

    /// Overwrite one key; returns what was there before.
    pub fn set(&mut self, key: EquipmentKey, record: StatusRecord) -> Option<StatusRecord> {
        self.records.insert(key, record)
    }

    /// Put back what `set` replaced
    pub(super) fn restore(&mut self, key: &EquipmentKey, previous: Option<StatusRecord>) {
        match previous {
            Some(record) => {
                self.records.insert(key.clone(), record);
            }
            None => {
                self.records.remove(key);
            }
        }
    }

    pub fn records(&self) -> &BTreeMap<EquipmentKey, StatusRecord> {
        &self.records
    }
}

/// Session-local copy of the activity log, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCache {
    entries: VecDeque<LogEntry>,
}

impl LogCache {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn prepend(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&LogEntry) -> bool + 'a,
    ) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |entry| predicate(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Swap the front entry if it is the one with `id`
    pub(super) fn replace_front(&mut self, id: LogEntryId, entry: LogEntry) -> bool {
        match self.entries.front_mut() {
            Some(front) if front.id == id => {
                *front = entry;
                true
            }
            _ => false,
        }
    }

    /// Drop the front entry if it is the one with `id`
    pub(super) fn remove_front(&mut self, id: LogEntryId) -> bool {
        if self.entries.front().is_some_and(|front| front.id == id) {
            self.entries.pop_front();
            true
        } else {
            false
        }
    }
}

impl<'a> IntoIterator for &'a LogCache {
    type Item = &'a LogEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
