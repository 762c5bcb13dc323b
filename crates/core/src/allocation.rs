//! Time allocation
//!
//! Computes `[start, end)` intervals for work items that lack one (issues),
//! apportioning whatever remains of the daily budget after fixed-interval
//! items are accounted for.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use timeweave_domain::constants::DAY_START_HOUR;
use timeweave_domain::{TimeInterval, WorkItem};
use tracing::{debug, info};

/// A computed interval for one work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub item_id: String,
    pub interval: TimeInterval,
}

/// Apportions unused daily capacity across interval-less work items.
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    budget: Duration,
    consumed: Duration,
}

impl Allocator {
    /// `budget` is the full work-day duration; `consumed` is the time already
    /// taken by fixed-interval items.
    pub fn new(budget: Duration, consumed: Duration) -> Self {
        Self { budget, consumed }
    }

    /// Allocate intervals for every item in `items` that lacks one.
    ///
    /// Remaining capacity is divided equally across all eligible items, with
    /// no priority weighting. Items are grouped by the UTC calendar day of
    /// their anchor; within a day, intervals are contiguous starting at the
    /// fixed day-start hour, and day cursors are fully independent.
    ///
    /// Returns no allocations when the budget is already consumed; the caller
    /// reports those items rather than silently skipping them.
    pub fn allocate(&self, items: &[WorkItem]) -> Vec<Allocation> {
        let eligible: Vec<&WorkItem> = items.iter().filter(|i| i.interval.is_none()).collect();
        if eligible.is_empty() {
            return Vec::new();
        }

        let remaining = (self.budget - self.consumed).max(Duration::zero());
        if remaining.is_zero() {
            info!(
                eligible = eligible.len(),
                "daily budget exhausted by fixed-interval items; nothing to allocate"
            );
            return Vec::new();
        }

        // Guarded against division by zero by the is_empty check above.
        let divisor = i32::try_from(eligible.len()).unwrap_or(i32::MAX);
        let per_item = remaining / divisor;
        debug!(
            eligible = eligible.len(),
            remaining_minutes = remaining.num_minutes(),
            per_item_minutes = per_item.num_minutes(),
            "allocating remaining daily capacity"
        );

        let mut cursors: HashMap<NaiveDate, DateTime<Utc>> = HashMap::new();
        let mut allocations = Vec::with_capacity(eligible.len());

        for item in eligible {
            let day = item.anchor.date_naive();
            let cursor = cursors.entry(day).or_insert_with(|| day_start(day, item.anchor));
            let interval = TimeInterval { start: *cursor, end: *cursor + per_item };
            *cursor = interval.end;
            allocations.push(Allocation { item_id: item.id.clone(), interval });
        }

        allocations
    }
}

/// First allocation of a day starts at the fixed day-start hour.
fn day_start(day: NaiveDate, fallback: DateTime<Utc>) -> DateTime<Utc> {
    day.and_hms_opt(DAY_START_HOUR, 0, 0).map_or(fallback, |t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use timeweave_domain::{IssueStatus, WorkItemKind};

    use super::*;

    fn issue(id: &str, anchor: DateTime<Utc>) -> WorkItem {
        WorkItem {
            id: id.into(),
            description: format!("#{id} issue"),
            kind: WorkItemKind::Issue,
            status: Some(IssueStatus::InProgress),
            anchor,
            interval: None,
        }
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> WorkItem {
        WorkItem {
            id: id.into(),
            description: "meeting".into(),
            kind: WorkItemKind::CalendarEvent,
            status: None,
            anchor: start,
            interval: Some(TimeInterval { start, end }),
        }
    }

    fn anchor(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn divides_remaining_budget_equally_and_contiguously() {
        let allocator = Allocator::new(Duration::hours(8), Duration::hours(2));
        let items = vec![issue("a", anchor(5, 14)), issue("b", anchor(5, 16))];

        let allocations = allocator.allocate(&items);

        assert_eq!(allocations.len(), 2);
        // 6 remaining hours split two ways, starting at 09:00.
        assert_eq!(allocations[0].interval.start, anchor(5, 9));
        assert_eq!(allocations[0].interval.end, anchor(5, 12));
        assert_eq!(allocations[1].interval.start, anchor(5, 12));
        assert_eq!(allocations[1].interval.end, anchor(5, 15));
    }

    #[test]
    fn exhausted_budget_produces_no_allocations() {
        let allocator = Allocator::new(Duration::hours(8), Duration::hours(8));
        let items = vec![issue("a", anchor(5, 14))];

        assert!(allocator.allocate(&items).is_empty());
    }

    #[test]
    fn over_consumed_budget_is_clamped_to_zero() {
        let allocator = Allocator::new(Duration::hours(8), Duration::hours(10));
        let items = vec![issue("a", anchor(5, 14))];

        assert!(allocator.allocate(&items).is_empty());
    }

    #[test]
    fn day_cursors_are_independent() {
        let allocator = Allocator::new(Duration::hours(8), Duration::zero());
        let items = vec![
            issue("a", anchor(5, 14)),
            issue("b", anchor(6, 10)),
            issue("c", anchor(5, 18)),
            issue("d", anchor(6, 11)),
        ];

        let allocations = allocator.allocate(&items);

        // 8 hours over 4 items: 2 hours each; both days start at 09:00.
        assert_eq!(allocations[0].interval.start, anchor(5, 9));
        assert_eq!(allocations[1].interval.start, anchor(6, 9));
        assert_eq!(allocations[2].interval.start, anchor(5, 11));
        assert_eq!(allocations[3].interval.start, anchor(6, 11));

        // No overlap within either day.
        assert_eq!(allocations[0].interval.end, allocations[2].interval.start);
        assert_eq!(allocations[1].interval.end, allocations[3].interval.start);
    }

    #[test]
    fn items_with_native_intervals_are_not_allocated() {
        let allocator = Allocator::new(Duration::hours(8), Duration::hours(1));
        let items = vec![
            event("e1", anchor(5, 10), anchor(5, 11)),
            issue("a", anchor(5, 14)),
        ];

        let allocations = allocator.allocate(&items);

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].item_id, "a");
        // Sole eligible item takes the whole 7 remaining hours.
        assert_eq!(allocations[0].interval.duration(), Duration::hours(7));
    }

    #[test]
    fn no_eligible_items_short_circuits() {
        let allocator = Allocator::new(Duration::hours(8), Duration::zero());
        let items = vec![event("e1", anchor(5, 10), anchor(5, 11))];

        assert!(allocator.allocate(&items).is_empty());
    }
}
