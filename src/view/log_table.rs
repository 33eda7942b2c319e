use crate::domain::{Action, Borrower, Catalog, EquipmentKey, LogEntry};

use super::TimestampFormat;

/// Placeholder shown when no entry matches the filter
pub const EMPTY_LOG_MESSAGE: &str = "No borrowing has been recorded yet.";

/// Log table filter: everything, or one item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Key(EquipmentKey),
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Key(key) => &entry.key == key,
        }
    }
}

impl std::str::FromStr for LogFilter {
    type Err = std::convert::Infallible;

    /// `"all"` (or empty) selects everything; anything else is a key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(LogFilter::All),
            key => Ok(LogFilter::Key(EquipmentKey::new(key))),
        }
    }
}

/// Filter dropdown options: `("all", "All equipment")` then one per item
pub fn filter_options(catalog: &Catalog) -> Vec<(String, String)> {
    std::iter::once(("all".to_string(), "All equipment".to_string()))
        .chain(
            catalog
                .items()
                .iter()
                .map(|item| (item.key.to_string(), item.name.clone())),
        )
        .collect()
}

/// Entries matching the filter, order preserved
pub fn filter_log<'a>(
    logs: impl IntoIterator<Item = &'a LogEntry>,
    filter: &LogFilter,
) -> Vec<&'a LogEntry> {
    logs.into_iter().filter(|entry| filter.matches(entry)).collect()
}

pub fn action_icon(action: Action) -> &'static str {
    match action {
        Action::Borrow => "⬆️",
        Action::Return => "⬇️",
    }
}

pub fn action_label(action: Action) -> &'static str {
    match action {
        Action::Borrow => "Borrow",
        Action::Return => "Return",
    }
}

/// One kiosk log row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub equipment_name: String,
    pub holder_name: String,
    /// `-` when the entry has no phone
    pub phone: String,
    /// Icon and label, e.g. `⬆️ Borrow`
    pub action: String,
    pub timestamp: String,
}

/// Kiosk log table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTableView {
    /// Single placeholder row
    Empty { message: &'static str },
    Rows(Vec<LogRow>),
}

impl LogTableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, LogTableView::Empty { .. })
    }
}

pub fn render_log_table<'a>(
    logs: impl IntoIterator<Item = &'a LogEntry>,
    filter: &LogFilter,
    format: &TimestampFormat,
) -> LogTableView {
    let rows: Vec<LogRow> = filter_log(logs, filter)
        .into_iter()
        .map(|entry| LogRow {
            equipment_name: entry.equipment_name.clone(),
            holder_name: entry.full_name.clone(),
            phone: if entry.phone.is_empty() {
                "-".to_string()
            } else {
                entry.phone.clone()
            },
            action: format!("{} {}", action_icon(entry.action), action_label(entry.action)),
            timestamp: format.format(&entry.timestamp),
        })
        .collect();

    if rows.is_empty() {
        LogTableView::Empty {
            message: EMPTY_LOG_MESSAGE,
        }
    } else {
        LogTableView::Rows(rows)
    }
}

// ============================================================================
// Admin tables
// ============================================================================

/// One admin log row (identity fields included, blanks stay blank)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLogRow {
    pub equipment_name: String,
    pub full_name: String,
    pub student_id: String,
    pub phone: String,
    pub action: &'static str,
    pub timestamp: String,
}

pub fn render_admin_logs(logs: &[LogEntry], format: &TimestampFormat) -> Vec<AdminLogRow> {
    logs.iter()
        .map(|entry| AdminLogRow {
            equipment_name: entry.equipment_name.clone(),
            full_name: entry.full_name.clone(),
            student_id: entry
                .student_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            phone: entry.phone.clone(),
            action: action_label(entry.action),
            timestamp: format.format(&entry.timestamp),
        })
        .collect()
}

/// One admin users row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub full_name: String,
    pub student_id: String,
    pub phone: String,
}

pub fn render_users(users: &[Borrower]) -> Vec<UserRow> {
    users
        .iter()
        .map(|user| UserRow {
            full_name: user.full_name.clone(),
            student_id: user.student_id.to_string(),
            phone: user.phone.clone(),
        })
        .collect()
}
