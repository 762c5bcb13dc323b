//! Domain types and models

pub mod catalog;
pub mod records;
pub mod window;
pub mod work_item;

pub use catalog::{Catalog, Project, Task};
pub use records::{
    CalendarEventRecord, ExistingEntry, IssueRecord, ProjectMembership, ProjectRef,
};
pub use window::{to_entry_timestamp, SyncWindow};
pub use work_item::{
    IssueStatus, MatchResult, TimeEntryDraft, TimeInterval, WorkItem, WorkItemKind,
};
