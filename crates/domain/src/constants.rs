//! Domain constants

/// Hours in a working day; unallocated issue time is apportioned from this
/// budget.
pub const WORKDAY_HOURS: i64 = 8;

/// Hour of day (UTC) at which the first allocated interval of a day starts.
pub const DAY_START_HOUR: u32 = 9;

/// Canonical second-precision UTC format used for time-entry timestamps.
///
/// The tracker stores entry times in this exact shape, so formatting both
/// sides identically makes exact string comparison sufficient for duplicate
/// detection.
pub const ENTRY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Extra days queried before the sync window when building the duplicate
/// index, to catch entries whose start precedes the window boundary.
pub const DEDUP_BUFFER_DAYS: i64 = 1;

/// Description used for calendar events without a title.
pub const UNTITLED_EVENT: &str = "No Title";
