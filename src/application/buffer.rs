// Reading buffer - deduplicated in-memory store of decoded readings
use std::collections::HashSet;

use crate::domain::category::CategoryId;
use crate::domain::reading::Reading;

/// Owns every reading received during the current session. Merging dedups by
/// `(category_id, timestamp)` so a late or replayed poll response cannot
/// introduce duplicates, only arrive late and be absorbed.
#[derive(Debug, Default)]
pub struct ReadingBuffer {
    readings: Vec<Reading>,
    seen: HashSet<(CategoryId, i64)>,
    last_seen: Option<i64>,
}

impl ReadingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fetched batch, skipping readings already present. Returns
    /// the number of readings actually appended. `last_seen` becomes the
    /// maximum timestamp across the whole buffer afterwards.
    pub fn merge(&mut self, incoming: Vec<Reading>) -> usize {
        let mut appended = 0;
        for reading in incoming {
            let key = (reading.category_id, reading.timestamp);
            if !self.seen.insert(key) {
                continue;
            }
            self.last_seen = Some(match self.last_seen {
                Some(current) => current.max(reading.timestamp),
                None => reading.timestamp,
            });
            self.readings.push(reading);
            appended += 1;
        }
        appended
    }

    /// The maximum timestamp present in the buffer, used as the lower bound
    /// of the next incremental poll. Monotonically non-decreasing.
    pub fn last_seen(&self) -> Option<i64> {
        self.last_seen
    }

    /// All readings in arrival order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The series for one category: its readings sorted by timestamp
    /// ascending, ties keeping arrival order (stable sort).
    pub fn series_for(&self, id: CategoryId) -> Vec<Reading> {
        let mut series: Vec<Reading> = self
            .readings
            .iter()
            .filter(|r| r.category_id == id)
            .cloned()
            .collect();
        series.sort_by_key(|r| r.timestamp);
        series
    }

    /// Discard everything, e.g. when a new logging session starts.
    pub fn clear(&mut self) {
        self.readings.clear();
        self.seen.clear();
        self.last_seen = None;
    }
}
