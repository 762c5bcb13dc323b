//! Work-item normalization
//!
//! Turns raw collaborator records into the normalized work items the matcher
//! and allocator operate on.

use chrono::{DateTime, Utc};
use timeweave_domain::constants::UNTITLED_EVENT;
use timeweave_domain::{
    CalendarEventRecord, IssueRecord, IssueStatus, SyncWindow, TimeInterval, WorkItem,
    WorkItemKind,
};
use tracing::{debug, warn};

/// Normalize calendar events into work items.
///
/// All-day (date-only) events are excluded entirely; events whose timestamps
/// fail to parse are skipped with a warning rather than aborting the stage.
pub fn events_to_work_items(events: Vec<CalendarEventRecord>) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(events.len());

    for event in events {
        let description = event
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_EVENT.to_string());

        if event.is_all_day {
            debug!(event_id = %event.id, %description, "skipping all-day event");
            continue;
        }

        let (start, end) = match (parse_timestamp(&event.start), parse_timestamp(&event.end)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!(
                    event_id = %event.id,
                    start = %event.start,
                    end = %event.end,
                    "skipping event with unparseable timestamps"
                );
                continue;
            }
        };

        items.push(WorkItem {
            id: event.id,
            description,
            kind: WorkItemKind::CalendarEvent,
            status: None,
            anchor: start,
            interval: Some(TimeInterval { start, end }),
        });
    }

    items
}

/// Normalize assigned issues into work items.
///
/// Status is resolved from the issue's project memberships, optionally
/// restricted to `target_project`. Done issues are included only when their
/// update time falls inside the sync window and are anchored to it; in-
/// progress issues are anchored to `now` so they resurface on every run
/// until closed. Issues never carry a native interval.
pub fn issues_to_work_items(
    issues: Vec<IssueRecord>,
    target_project: Option<&str>,
    window: &SyncWindow,
    now: DateTime<Utc>,
) -> Vec<WorkItem> {
    let mut items = Vec::new();

    for issue in issues {
        let Some(status) = resolve_status(&issue, target_project) else {
            continue;
        };

        let description = format!("#{} {}", issue.number, issue.title);

        let anchor = match status {
            IssueStatus::InProgress => now,
            IssueStatus::Done => {
                let Some(updated) = issue.updated_at.as_deref().and_then(parse_timestamp) else {
                    debug!(issue = %description, "done issue has no usable update time; skipping");
                    continue;
                };
                if !window.contains(updated) {
                    debug!(issue = %description, "done issue finished outside the sync window");
                    continue;
                }
                updated
            }
        };

        items.push(WorkItem {
            id: format!("issue-{}", issue.number),
            description,
            kind: WorkItemKind::Issue,
            status: Some(status),
            anchor,
            interval: None,
        });
    }

    items
}

/// Resolve an issue's status from its project memberships.
///
/// Memberships not matching the target project (when set) are ignored. The
/// first remaining membership whose status text contains "in progress" wins;
/// "done" is checked second. Case-insensitive substring match.
fn resolve_status(issue: &IssueRecord, target_project: Option<&str>) -> Option<IssueStatus> {
    for membership in &issue.memberships {
        if let Some(target) = target_project {
            if membership.project_name != target {
                continue;
            }
        }

        let status = membership.status.to_lowercase();
        if status.contains("in progress") {
            return Some(IssueStatus::InProgress);
        }
        if status.contains("done") {
            return Some(IssueStatus::Done);
        }
    }
    None
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}
