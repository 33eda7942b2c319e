use crate::domain::{Borrower, LogEntry};

/// Columns of the log export
pub const LOG_EXPORT_FIELDS: [&str; 6] = [
    "equipmentName",
    "fullName",
    "studentId",
    "phone",
    "action",
    "timestamp",
];

/// Columns of the users export
pub const USER_EXPORT_FIELDS: [&str; 3] = ["fullName", "studentId", "phone"];

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

/// A record that can be exported by field name
pub trait CsvRecord {
    /// Value of a named field; `None` exports as an empty string.
    fn field(&self, name: &str) -> Option<String>;
}

impl CsvRecord for LogEntry {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "key" => Some(self.key.to_string()),
            "equipmentName" => Some(self.equipment_name.clone()),
            "fullName" => Some(self.full_name.clone()),
            "studentId" => self.student_id.as_ref().map(|id| id.to_string()),
            "phone" => Some(self.phone.clone()),
            "action" => Some(self.action.to_string()),
            "timestamp" => Some(self.timestamp.clone()),
            _ => None,
        }
    }
}

impl CsvRecord for Borrower {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "fullName" => Some(self.full_name.clone()),
            "studentId" => Some(self.student_id.to_string()),
            "phone" => Some(self.phone.clone()),
            _ => None,
        }
    }
}

/// A downloadable CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// Serialize rows to CSV
///
/// Header line is the field names joined by commas. Every value is wrapped in
/// double quotes with embedded quotes doubled. Lines are joined with CRLF and
/// there is no trailing line break.
pub fn to_csv<R: CsvRecord>(fields: &[&str], rows: &[R]) -> String {
    let header = fields.join(",");

    let lines = rows.iter().map(|row| {
        fields
            .iter()
            .map(|name| quote(&row.field(name).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn export_logs(rows: &[LogEntry]) -> CsvExport {
    CsvExport {
        filename: "logs.csv",
        content_type: CSV_CONTENT_TYPE,
        body: to_csv(&LOG_EXPORT_FIELDS, rows),
    }
}

pub fn export_users(rows: &[Borrower]) -> CsvExport {
    CsvExport {
        filename: "users.csv",
        content_type: CSV_CONTENT_TYPE,
        body: to_csv(&USER_EXPORT_FIELDS, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentId;

    fn borrower(name: &str, student_id: &str, phone: &str) -> Borrower {
        Borrower {
            full_name: name.to_string(),
            student_id: StudentId::new(student_id),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_n_rows_produce_n_plus_one_lines() {
        let rows = vec![
            borrower("Sara", "1", "0912"),
            borrower("Ali", "2", "0935"),
            borrower("Reza", "3", ""),
        ];
        let csv = to_csv(&USER_EXPORT_FIELDS, &rows);
        assert_eq!(csv.split("\r\n").count(), 4);
        assert!(!csv.ends_with("\r\n"));
    }

    #[test]
    fn test_quotes_are_doubled_and_field_is_quoted() {
        let rows = vec![borrower("Sara \"the Builder\", Jr.", "1", "")];
        let csv = to_csv(&USER_EXPORT_FIELDS, &rows);
        assert_eq!(
            csv,
            "fullName,studentId,phone\r\n\"Sara \"\"the Builder\"\", Jr.\",\"1\",\"\""
        );
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let export = export_logs(&[]);
        assert_eq!(export.filename, "logs.csv");
        assert_eq!(export.content_type, CSV_CONTENT_TYPE);
        assert_eq!(
            export.body,
            "equipmentName,fullName,studentId,phone,action,timestamp"
        );
    }

    #[test]
    fn test_users_export_filename() {
        assert_eq!(export_users(&[]).filename, "users.csv");
    }
}
