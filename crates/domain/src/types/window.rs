//! Sync window

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ENTRY_TIME_FORMAT;

/// The `[start, end]` time range a sync run covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SyncWindow {
    /// Window covering the past `days` days up to `now`.
    pub fn past_days(days: i64, now: DateTime<Utc>) -> Self {
        Self { start: now - Duration::days(days), end: now }
    }

    /// Window from the start of the current UTC day to `now`.
    pub fn today(now: DateTime<Utc>) -> Self {
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map_or(now, |midnight| midnight.and_utc());
        Self { start, end: now }
    }

    /// The same window with its start moved `days` days earlier.
    ///
    /// Used when querying existing entries so that entries starting just
    /// before the nominal window are still seen by duplicate detection.
    pub fn with_buffer(&self, days: i64) -> Self {
        Self { start: self.start - Duration::days(days), end: self.end }
    }

    /// Inclusive containment check.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Format a timestamp in the tracker's canonical second-precision UTC shape.
pub fn to_entry_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(ENTRY_TIME_FORMAT).to_string()
}
