use chrono::{DateTime, SecondsFormat, Utc};

use super::{
    Action, Catalog, EquipmentItem, LogEntry, LogEntryId, Operation, OperationRejection,
    StatusRecord, StudentId,
};

// ============================================================================
// State
// ============================================================================

/// Checkout state of one item, derived from its latest status record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// Never used, or last action was a return
    Available,
    /// Held by this student
    Borrowed(StudentId),
}

impl ItemState {
    pub fn of(record: Option<&StatusRecord>) -> Self {
        match record {
            Some(record) if record.is_borrowed() => ItemState::Borrowed(record.student_id.clone()),
            _ => ItemState::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ItemState::Available)
    }
}

// ============================================================================
// Pure functions
// ============================================================================

/// Pure function: check an operation against the transition table
///
/// | request | Available     | Borrowed(x), x = requester | Borrowed(x), x ≠ requester |
/// |---------|---------------|----------------------------|----------------------------|
/// | Borrow  | accept        | AlreadyBorrowed (self)     | AlreadyBorrowed (other)    |
/// | Return  | NotBorrowed   | accept                     | WrongHolder                |
pub fn check_transition(
    op: &Operation,
    current: Option<&StatusRecord>,
) -> Result<(), OperationRejection> {
    match (op.action, ItemState::of(current)) {
        (Action::Borrow, ItemState::Available) => Ok(()),
        (Action::Borrow, ItemState::Borrowed(holder)) => Err(OperationRejection::AlreadyBorrowed {
            by_requester: holder == op.student_id,
        }),
        (Action::Return, ItemState::Available) => Err(OperationRejection::NotBorrowed),
        (Action::Return, ItemState::Borrowed(holder)) if holder == op.student_id => Ok(()),
        (Action::Return, ItemState::Borrowed(_)) => Err(OperationRejection::WrongHolder),
    }
}

/// Pure function: full local validation of a submission
///
/// Trims and requires the holder fields, resolves the key against the catalog
/// and then applies the transition table. Returns the normalized operation and
/// the catalog item it targets.
pub fn validate<'a>(
    catalog: &'a Catalog,
    op: Operation,
    current: Option<&StatusRecord>,
) -> Result<(Operation, &'a EquipmentItem), OperationRejection> {
    let op = op.normalized()?;
    let item = catalog
        .find(&op.key)
        .ok_or_else(|| OperationRejection::UnknownEquipment(op.key.clone()))?;

    check_transition(&op, current)?;

    Ok((op, item))
}

/// Pure function: apply an accepted operation
///
/// Produces exactly one new status record and exactly one log entry, both
/// stamped with `at`. No side effects.
pub fn apply(
    op: &Operation,
    equipment_name: &str,
    current: Option<&StatusRecord>,
    at: DateTime<Utc>,
) -> Result<(StatusRecord, LogEntry), OperationRejection> {
    check_transition(op, current)?;

    let timestamp = format_timestamp(at);

    let record = StatusRecord {
        last_action: op.action,
        full_name: op.full_name.clone(),
        student_id: op.student_id.clone(),
        phone: op.phone.clone(),
        timestamp: timestamp.clone(),
    };

    let entry = LogEntry {
        id: LogEntryId::new(),
        key: op.key.clone(),
        equipment_name: equipment_name.to_string(),
        full_name: op.full_name.clone(),
        student_id: Some(op.student_id.clone()),
        phone: op.phone.clone(),
        action: op.action,
        timestamp,
    };

    Ok((record, entry))
}

/// ISO-8601 UTC with millisecond precision (`2024-05-01T10:00:00.000Z`)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EquipmentKey;
    use chrono::TimeZone;

    fn op(action: Action, student_id: &str) -> Operation {
        Operation {
            key: EquipmentKey::new("jetson-orin"),
            full_name: format!("Student {}", student_id),
            student_id: StudentId::new(student_id),
            phone: "09120000000".to_string(),
            action,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
    }

    fn borrowed_by(student_id: &str) -> StatusRecord {
        apply(&op(Action::Borrow, student_id), "Jetson Orin", None, at())
            .unwrap()
            .0
    }

    #[test]
    fn test_never_used_item_is_available() {
        assert_eq!(ItemState::of(None), ItemState::Available);
    }

    #[test]
    fn test_returned_record_is_available() {
        let borrowed = borrowed_by("123");
        let (returned, _) = apply(&op(Action::Return, "123"), "Jetson Orin", Some(&borrowed), at())
            .unwrap();
        assert_eq!(ItemState::of(Some(&returned)), ItemState::Available);
    }

    #[test]
    fn test_borrow_available_item() {
        let (record, entry) = apply(&op(Action::Borrow, "123"), "Jetson Orin", None, at()).unwrap();

        assert_eq!(ItemState::of(Some(&record)), ItemState::Borrowed(StudentId::new("123")));
        assert_eq!(record.timestamp, "2024-05-01T10:30:00.000Z");
        assert_eq!(entry.timestamp, record.timestamp);
        assert_eq!(entry.equipment_name, "Jetson Orin");
        assert_eq!(entry.student_id, Some(StudentId::new("123")));
        assert_eq!(entry.action, Action::Borrow);
    }

    #[test]
    fn test_borrow_own_item_is_self_conflict() {
        let current = borrowed_by("123");
        let result = check_transition(&op(Action::Borrow, "123"), Some(&current));
        assert_eq!(
            result,
            Err(OperationRejection::AlreadyBorrowed { by_requester: true })
        );
    }

    #[test]
    fn test_borrow_someone_elses_item_is_other_holder_conflict() {
        let current = borrowed_by("123");
        let result = check_transition(&op(Action::Borrow, "456"), Some(&current));
        assert_eq!(
            result,
            Err(OperationRejection::AlreadyBorrowed { by_requester: false })
        );
    }

    #[test]
    fn test_self_and_other_conflict_messages_differ() {
        let own = OperationRejection::AlreadyBorrowed { by_requester: true }.to_string();
        let other = OperationRejection::AlreadyBorrowed { by_requester: false }.to_string();
        assert_ne!(own, other);
    }

    #[test]
    fn test_return_available_item_is_not_borrowed() {
        assert_eq!(
            check_transition(&op(Action::Return, "123"), None),
            Err(OperationRejection::NotBorrowed)
        );
    }

    #[test]
    fn test_return_by_other_student_is_wrong_holder() {
        let current = borrowed_by("123");
        assert_eq!(
            check_transition(&op(Action::Return, "456"), Some(&current)),
            Err(OperationRejection::WrongHolder)
        );
    }

    #[test]
    fn test_apply_rejected_operation_produces_nothing() {
        let current = borrowed_by("123");
        assert!(apply(&op(Action::Borrow, "456"), "Jetson Orin", Some(&current), at()).is_err());
    }

    #[test]
    fn test_full_scenario() {
        let mut current: Option<StatusRecord> = None;

        let (record, _) = apply(&op(Action::Borrow, "123"), "Jetson Orin", current.as_ref(), at())
            .unwrap();
        current = Some(record);
        assert_eq!(
            ItemState::of(current.as_ref()),
            ItemState::Borrowed(StudentId::new("123"))
        );

        assert_eq!(
            check_transition(&op(Action::Borrow, "456"), current.as_ref()),
            Err(OperationRejection::AlreadyBorrowed { by_requester: false })
        );
        assert_eq!(
            check_transition(&op(Action::Return, "456"), current.as_ref()),
            Err(OperationRejection::WrongHolder)
        );

        let (record, _) = apply(&op(Action::Return, "123"), "Jetson Orin", current.as_ref(), at())
            .unwrap();
        current = Some(record);
        assert!(ItemState::of(current.as_ref()).is_available());
    }

    #[test]
    fn test_validate_unknown_equipment() {
        let catalog = Catalog::lab_default().unwrap();
        let mut operation = op(Action::Borrow, "123");
        operation.key = EquipmentKey::new("oscilloscope");

        assert_eq!(
            validate(&catalog, operation, None).unwrap_err(),
            OperationRejection::UnknownEquipment(EquipmentKey::new("oscilloscope"))
        );
    }

    #[test]
    fn test_validate_checks_fields_before_state() {
        let catalog = Catalog::lab_default().unwrap();
        let current = borrowed_by("123");
        let mut operation = op(Action::Borrow, "456");
        operation.phone = "  ".to_string();

        assert_eq!(
            validate(&catalog, operation, Some(&current)).unwrap_err(),
            OperationRejection::MissingField("phone")
        );
    }

    #[test]
    fn test_validate_returns_normalized_operation_and_item() {
        let catalog = Catalog::lab_default().unwrap();
        let mut operation = op(Action::Borrow, " 123 ");
        operation.full_name = " Sara ".to_string();

        let (normalized, item) = validate(&catalog, operation, None).unwrap();
        assert_eq!(normalized.student_id, StudentId::new("123"));
        assert_eq!(normalized.full_name, "Sara");
        assert_eq!(item.name, "Jetson Orin");
    }
}
