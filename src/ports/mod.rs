pub mod activity_log;
pub mod operation_journal;
pub mod status_store;

pub use activity_log::ActivityLog;
pub use operation_journal::OperationJournal;
pub use status_store::StatusStore;
