// Reading domain model
use chrono::DateTime;

use super::category::CategoryId;

/// A single timestamped sample for one category. Immutable once decoded;
/// the reading buffer owns these and renderers borrow them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub category_id: CategoryId,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
    pub value: f64,
}

impl Reading {
    pub fn new(category_id: CategoryId, timestamp: i64, value: f64) -> Self {
        Self {
            category_id,
            timestamp,
            value,
        }
    }

    /// Formats the timestamp for marker tooltips, e.g. "Jan 13 12:59:05.120".
    pub fn title_date(&self) -> String {
        match DateTime::from_timestamp_millis(self.timestamp) {
            Some(utc) => utc.format("%b %d %H:%M:%S%.3f").to_string(),
            None => self.timestamp.to_string(),
        }
    }
}
