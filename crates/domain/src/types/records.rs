//! Raw collaborator records
//!
//! Normalized shapes of what the external services return, before the core
//! turns them into work items. Wire-level field names stay in the infra
//! adapters; these carry only what the core consumes.

use serde::{Deserialize, Serialize};

/// A project reference from the tracker, before its tasks are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// A raw calendar event.
///
/// `start`/`end` are the provider's timestamp strings; all-day events carry
/// date-only values and are flagged so the core can exclude them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventRecord {
    pub id: String,
    pub summary: Option<String>,
    pub start: String,
    pub end: String,
    pub is_all_day: bool,
}

/// Membership of an issue in a tracker project board, with its status text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMembership {
    pub project_name: String,
    pub status: String,
}

/// A raw assigned issue from the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub updated_at: Option<String>,
    pub memberships: Vec<ProjectMembership>,
}

/// A previously recorded time entry, reduced to its duplicate signature
/// inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingEntry {
    /// Entry start as the tracker formatted it (second-precision UTC).
    pub start: String,
    pub description: String,
}
