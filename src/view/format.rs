use chrono::{DateTime, FixedOffset, Offset, Utc};

/// How timestamps are shown to users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    /// `chrono::format::strftime` pattern
    pub pattern: String,
    /// Wall-clock offset the lab reads times in
    pub offset: FixedOffset,
}

impl TimestampFormat {
    pub fn new(pattern: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            pattern: pattern.into(),
            offset,
        }
    }

    /// Short date and time in the machine's local offset
    pub fn local() -> Self {
        Self::new(DEFAULT_PATTERN, *chrono::Local::now().offset())
    }

    /// Format an ISO-8601 timestamp, or return the input unchanged if it
    /// does not parse.
    pub fn format(&self, raw: &str) -> String {
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(at) => at
                .with_timezone(&self.offset)
                .format(&self.pattern)
                .to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

const DEFAULT_PATTERN: &str = "%Y/%m/%d %H:%M";

impl Default for TimestampFormat {
    /// Short date and time in UTC
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN, Utc.fix())
    }
}
