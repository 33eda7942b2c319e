pub mod activity_log;
pub mod journal;
pub mod status_store;

pub use activity_log::ActivityLog;
pub use journal::OperationJournal;
pub use status_store::StatusStore;
