//! Pure projections of kiosk and admin state into view models
//!
//! Nothing here performs I/O; a presentation layer binds the returned
//! models to actual output.

pub mod cards;
pub mod export;
pub mod format;
pub mod log_table;

pub use cards::{Availability, CardView, render_card, render_cards};
pub use export::{CsvExport, CsvRecord, export_logs, export_users, to_csv};
pub use format::TimestampFormat;
pub use log_table::{
    AdminLogRow, EMPTY_LOG_MESSAGE, LogFilter, LogRow, LogTableView, UserRow, filter_log, filter_options,
    render_admin_logs, render_log_table, render_users,
};
