//! Work items and match results
//!
//! A work item is a unit of work (calendar event or tracked issue) eligible
//! for time-entry creation. Items are immutable once constructed, except that
//! the sync driver attaches an allocated interval to issues that lack one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Where a work item came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    CalendarEvent,
    Issue,
}

/// Tracked issue status; only meaningful for issue-kind items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    InProgress,
    Done,
}

/// A half-open `[start, end)` time interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A unit of work eligible for time-entry creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Correlation key for batch matching, unique within a single run.
    /// Never persisted.
    pub id: String,
    /// Free text; the classification input and the eventual entry label.
    pub description: String,
    pub kind: WorkItemKind,
    pub status: Option<IssueStatus>,
    /// Timestamp determining which day the item belongs to.
    pub anchor: DateTime<Utc>,
    /// Known `[start, end)` bounds. Present for calendar events, absent for
    /// issues until the allocator assigns one.
    pub interval: Option<TimeInterval>,
}

/// Outcome of matching one work item against the catalog.
///
/// Invariant: when `task_id` is set, the task exists in the catalog and
/// `project_id` is that task's true owning project. The matcher enforces
/// this regardless of what the classifier returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    /// Diagnostic only; never interpreted.
    pub reasoning: String,
}

impl MatchResult {
    /// An explicit no-match result with a diagnostic note.
    pub fn unmatched(reasoning: impl Into<String>) -> Self {
        Self { project_id: None, task_id: None, reasoning: reasoning.into() }
    }
}

/// A create-time-entry intent produced by the sync driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntryDraft {
    pub description: String,
    pub interval: TimeInterval,
    pub project_id: String,
    pub task_id: Option<String>,
}
