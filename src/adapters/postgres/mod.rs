pub mod activity_log;
pub mod journal;
pub mod status_store;

pub use activity_log::ActivityLog as PostgresActivityLog;
pub use journal::OperationJournal as PostgresOperationJournal;
pub use status_store::StatusStore as PostgresStatusStore;
