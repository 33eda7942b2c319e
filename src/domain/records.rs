use serde::{Deserialize, Serialize};

use super::{Action, EquipmentKey, LogEntryId, StudentId};

/// Latest borrow/return state of one item
///
/// `last_action == Borrow` means the item is held by the recorded person.
/// Records are overwritten by accepted operations and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub last_action: Action,
    pub full_name: String,
    pub student_id: StudentId,
    #[serde(default)]
    pub phone: String,
    /// ISO-8601, kept as received so rendering can fall back to the raw text
    pub timestamp: String,
}

impl StatusRecord {
    pub fn is_borrowed(&self) -> bool {
        self.last_action == Action::Borrow
    }
}

/// Immutable history record of one accepted operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub id: LogEntryId,
    pub key: EquipmentKey,
    pub equipment_name: String,
    pub full_name: String,
    /// Absent on the public feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub phone: String,
    pub action: Action,
    pub timestamp: String,
}

impl LogEntry {
    /// Copy without identity fields, for the public kiosk feed.
    pub fn redacted(&self) -> Self {
        Self {
            student_id: None,
            ..self.clone()
        }
    }
}

/// Someone who has operated on the equipment, as listed to admins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub full_name: String,
    pub student_id: StudentId,
    #[serde(default)]
    pub phone: String,
}
