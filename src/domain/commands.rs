use serde::{Deserialize, Serialize};

use super::{Action, EquipmentKey, OperationRejection, StudentId};

/// Command: borrow or return one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub key: EquipmentKey,
    pub full_name: String,
    pub student_id: StudentId,
    pub phone: String,
    pub action: Action,
}

impl Operation {
    /// Trims the holder fields and requires each to be non-empty.
    pub fn normalized(self) -> Result<Self, OperationRejection> {
        let full_name = self.full_name.trim().to_string();
        let student_id = self.student_id.as_str().trim().to_string();
        let phone = self.phone.trim().to_string();

        if full_name.is_empty() {
            return Err(OperationRejection::MissingField("fullName"));
        }
        if student_id.is_empty() {
            return Err(OperationRejection::MissingField("studentId"));
        }
        if phone.is_empty() {
            return Err(OperationRejection::MissingField("phone"));
        }

        Ok(Self {
            key: self.key,
            full_name,
            student_id: StudentId::new(student_id),
            phone,
            action: self.action,
        })
    }
}
