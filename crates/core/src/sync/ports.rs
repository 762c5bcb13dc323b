//! Port interfaces for the external collaborators
//!
//! Narrow contracts over the catalog source, the two work-item sources, and
//! the time-entry sink. Transport, authentication, and pagination live behind
//! these traits in the infra adapters.

use async_trait::async_trait;
use timeweave_domain::{
    CalendarEventRecord, ExistingEntry, IssueRecord, ProjectRef, Result, SyncWindow, Task,
    TimeEntryDraft,
};

/// Source of the project/task catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>>;

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>>;
}

/// Source of calendar events for a time window.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(
        &self,
        window: &SyncWindow,
        calendar_id: &str,
    ) -> Result<Vec<CalendarEventRecord>>;
}

/// Source of issues assigned to the current user.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn list_assigned_issues(&self) -> Result<Vec<IssueRecord>>;
}

/// The time-tracking sink.
///
/// `create_entry` makes no idempotency promise; duplicate suppression is
/// entirely the caller's responsibility.
#[async_trait]
pub trait TimeEntrySink: Send + Sync {
    async fn list_entries(&self, window: &SyncWindow) -> Result<Vec<ExistingEntry>>;

    async fn create_entry(&self, draft: &TimeEntryDraft) -> Result<()>;
}
