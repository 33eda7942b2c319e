mod common;

use chrono::{TimeZone, Utc};
use async_trait::async_trait;
use common::{memory_deps, memory_deps_with, operation};
use lab_equipment_tracker::application::admin;
use lab_equipment_tracker::application::checkout::{
    CheckoutApplicationError, history_for, load_state, submit_operation,
};
use lab_equipment_tracker::domain::{
    Action, EquipmentKey, LogEntry, OperationRejection, StatusRecord, StudentId,
};
use lab_equipment_tracker::ports::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn rejection(err: CheckoutApplicationError) -> OperationRejection {
    match err {
        CheckoutApplicationError::Rejected(rejection) => rejection,
        other => panic!("expected a rejection, got {:?}", other),
    }
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_borrow_then_return_by_holder() {
    let deps = memory_deps();
    let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let borrowed = submit_operation(
        &deps,
        operation("jetson-orin", "Sara", "401", Action::Borrow),
        t1,
    )
    .await
    .expect("borrow should be accepted");

    assert_eq!(borrowed.record.last_action, Action::Borrow);
    assert_eq!(borrowed.record.timestamp, "2024-05-01T10:30:00.000Z");
    assert_eq!(borrowed.entry.equipment_name, "Jetson Orin");

    let returned = submit_operation(
        &deps,
        operation("jetson-orin", "Sara", "401", Action::Return),
        t2,
    )
    .await
    .expect("return should be accepted");
    assert_eq!(returned.record.last_action, Action::Return);

    let state = load_state(&deps).await.unwrap();
    let key = EquipmentKey::new("jetson-orin");
    assert_eq!(state.equipment_status[&key], returned.record);

    // Newest first
    let actions: Vec<_> = state.logs.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![Action::Return, Action::Borrow]);
}

#[tokio::test]
async fn test_fields_are_trimmed_before_recording() {
    let deps = memory_deps();
    let mut op = operation("3d-printer", "  Ali  ", " 77 ", Action::Borrow);
    op.phone = " 0935 ".to_string();

    let outcome = submit_operation(&deps, op, Utc::now()).await.unwrap();

    assert_eq!(outcome.record.full_name, "Ali");
    assert_eq!(outcome.record.student_id, StudentId::new("77"));
    assert_eq!(outcome.record.phone, "0935");
}

// ============================================================================
// Rejections leave state untouched
// ============================================================================

#[tokio::test]
async fn test_second_borrow_is_rejected() {
    let deps = memory_deps();
    submit_operation(&deps, operation("jetson-orin", "Sara", "401", Action::Borrow), Utc::now())
        .await
        .unwrap();

    let err = submit_operation(&deps, operation("jetson-orin", "Ali", "402", Action::Borrow), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        rejection(err),
        OperationRejection::AlreadyBorrowed { by_requester: false }
    );

    let err = submit_operation(&deps, operation("jetson-orin", "Sara", "401", Action::Borrow), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        rejection(err),
        OperationRejection::AlreadyBorrowed { by_requester: true }
    );

    let state = load_state(&deps).await.unwrap();
    assert_eq!(state.logs.len(), 1);
}

#[tokio::test]
async fn test_return_by_other_student_is_rejected() {
    let deps = memory_deps();
    submit_operation(&deps, operation("jetson-orin", "Sara", "401", Action::Borrow), Utc::now())
        .await
        .unwrap();

    let err = submit_operation(&deps, operation("jetson-orin", "Ali", "402", Action::Return), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(rejection(err), OperationRejection::WrongHolder);

    let state = load_state(&deps).await.unwrap();
    assert!(state.equipment_status[&EquipmentKey::new("jetson-orin")].is_borrowed());
}

#[tokio::test]
async fn test_return_of_available_item_is_rejected() {
    let deps = memory_deps();

    let err = submit_operation(&deps, operation("3d-printer", "Sara", "401", Action::Return), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(rejection(err), OperationRejection::NotBorrowed);

    let state = load_state(&deps).await.unwrap();
    assert!(state.equipment_status.is_empty());
    assert!(state.logs.is_empty());
}

#[tokio::test]
async fn test_blank_field_is_rejected() {
    let deps = memory_deps();
    let mut op = operation("3d-printer", "Sara", "401", Action::Borrow);
    op.phone = "   ".to_string();

    let err = submit_operation(&deps, op, Utc::now()).await.unwrap_err();
    assert_eq!(rejection(err), OperationRejection::MissingField("phone"));
}

#[tokio::test]
async fn test_unknown_key_is_rejected() {
    let deps = memory_deps();

    let err = submit_operation(&deps, operation("oscilloscope", "Sara", "401", Action::Borrow), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        rejection(err),
        OperationRejection::UnknownEquipment(EquipmentKey::new("oscilloscope"))
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_borrows_of_one_item_accept_exactly_one() {
    let deps = Arc::new(memory_deps());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let deps = deps.clone();
            tokio::spawn(async move {
                let op = operation("jetson-orin", &format!("Student {}", i), &i.to_string(), Action::Borrow);
                submit_operation(&deps, op, Utc::now()).await
            })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert!(matches!(
                rejection(err),
                OperationRejection::AlreadyBorrowed { by_requester: false }
            )),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(load_state(&deps).await.unwrap().logs.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_items_do_not_block_each_other() {
    let deps = Arc::new(memory_deps());

    let keys = ["jetson-orin", "3d-printer", "raspberry-board"];
    let handles: Vec<_> = keys
        .iter()
        .map(|key| {
            let deps = deps.clone();
            let op = operation(key, "Sara", "401", Action::Borrow);
            tokio::spawn(async move { submit_operation(&deps, op, Utc::now()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().expect("each item can be borrowed once");
    }

    assert_eq!(load_state(&deps).await.unwrap().equipment_status.len(), 3);
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_history_for_one_item() {
    let deps = memory_deps();
    submit_operation(&deps, operation("jetson-orin", "Sara", "401", Action::Borrow), Utc::now())
        .await
        .unwrap();
    submit_operation(&deps, operation("3d-printer", "Ali", "402", Action::Borrow), Utc::now())
        .await
        .unwrap();

    let history = history_for(&deps, &EquipmentKey::new("3d-printer")).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].full_name, "Ali");

    let err = history_for(&deps, &EquipmentKey::new("nope")).await.unwrap_err();
    assert!(matches!(
        rejection(err),
        OperationRejection::UnknownEquipment(_)
    ));
}

#[tokio::test]
async fn test_users_are_distinct_with_latest_details() {
    let deps = memory_deps();
    let mut first = operation("jetson-orin", "Sara", "401", Action::Borrow);
    first.phone = "old".to_string();
    submit_operation(&deps, first, Utc::now()).await.unwrap();

    let mut second = operation("jetson-orin", "Sara K.", "401", Action::Return);
    second.phone = "new".to_string();
    submit_operation(&deps, second, Utc::now()).await.unwrap();

    submit_operation(&deps, operation("3d-printer", "Ali", "402", Action::Borrow), Utc::now())
        .await
        .unwrap();

    let users = admin::list_users(&deps).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].student_id, StudentId::new("402"));
    assert_eq!(users[1].full_name, "Sara K.");
    assert_eq!(users[1].phone, "new");
}

#[tokio::test]
async fn test_seeded_status_is_respected() {
    let key = EquipmentKey::new("jetson-orin");
    let seeded = StatusRecord {
        last_action: Action::Borrow,
        full_name: "Sara".to_string(),
        student_id: StudentId::new("401"),
        phone: String::new(),
        timestamp: "2024-05-01T10:30:00.000Z".to_string(),
    };

    let store = lab_equipment_tracker::adapters::memory::StatusStore::with_records(
        BTreeMap::from([(key.clone(), seeded)]),
    );
    let deps = memory_deps_with(store);

    assert!(deps.status_store.get(&key).await.unwrap().is_some());

    let err = submit_operation(&deps, operation("jetson-orin", "Ali", "402", Action::Borrow), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        rejection(err),
        OperationRejection::AlreadyBorrowed { by_requester: false }
    );
}

/// Journal whose writes always fail
struct UnavailableJournal;

#[async_trait]
impl OperationJournal for UnavailableJournal {
    async fn record(
        &self,
        _key: &EquipmentKey,
        _record: StatusRecord,
        _entry: LogEntry,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err("storage offline".into())
    }
}

#[tokio::test]
async fn test_failed_write_leaves_state_untouched() {
    let mut deps = memory_deps();
    deps.journal = Arc::new(UnavailableJournal);

    let err = submit_operation(
        &deps,
        operation("jetson-orin", "Sara", "401", Action::Borrow),
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CheckoutApplicationError::JournalError(_)));

    let state = load_state(&deps).await.unwrap();
    assert!(state.logs.is_empty());
    assert!(state.equipment_status.is_empty());
}
