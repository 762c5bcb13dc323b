//! Sync driver
//!
//! Sequences one run: build the catalog, build the duplicate index, collect
//! work items from both sources, allocate intervals, match the whole batch in
//! one classification call, and emit create-entry intents. Contains no
//! business logic beyond sequencing and degradation rules.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use timeweave_domain::constants::DEDUP_BUFFER_DAYS;
use timeweave_domain::{
    Catalog, Project, Result, SyncWindow, TimeEntryDraft, TimeweaveError, WorkItem,
    to_entry_timestamp,
};
use tracing::{error, info, warn};

use crate::allocation::Allocator;
use crate::dedup::DuplicateIndex;
use crate::matching::TaskMatcher;
use crate::sync::items::{events_to_work_items, issues_to_work_items};
use crate::sync::ports::{CatalogSource, EventSource, IssueSource, TimeEntrySink};

/// Per-run options for the sync driver.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Compute and report everything, but write nothing.
    pub dry_run: bool,
    pub calendar_id: String,
    /// Restrict the catalog and issue status checks to this project name.
    pub target_project: Option<String>,
    /// Daily budget for allocating interval-less items.
    pub workday: Duration,
}

/// Counts describing what one run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub would_create: usize,
    pub duplicates: usize,
    pub unmatched: usize,
    /// Interval-less items left unallocated because the budget was exhausted.
    pub skipped_no_budget: usize,
    pub failed_writes: usize,
    /// Work-item stages (calendar, issues) that failed to fetch.
    pub failed_stages: usize,
}

/// Orchestrates one synchronization run.
pub struct SyncService {
    catalog_source: Arc<dyn CatalogSource>,
    event_source: Arc<dyn EventSource>,
    issue_source: Arc<dyn IssueSource>,
    entry_sink: Arc<dyn TimeEntrySink>,
    matcher: TaskMatcher,
    options: SyncOptions,
}

impl SyncService {
    pub fn new(
        catalog_source: Arc<dyn CatalogSource>,
        event_source: Arc<dyn EventSource>,
        issue_source: Arc<dyn IssueSource>,
        entry_sink: Arc<dyn TimeEntrySink>,
        matcher: TaskMatcher,
        options: SyncOptions,
    ) -> Self {
        Self { catalog_source, event_source, issue_source, entry_sink, matcher, options }
    }

    /// Run one synchronization pass over `window`.
    ///
    /// Catalog failure aborts the run; a failed work-item stage is reported
    /// and the other stage still runs; a failed existing-entries query only
    /// disables duplicate suppression.
    pub async fn run(&self, window: SyncWindow) -> Result<SyncReport> {
        info!(start = %window.start, end = %window.end, dry_run = self.options.dry_run, "starting sync run");
        let mut report = SyncReport::default();

        let catalog = self.build_catalog().await?;
        let mut index = self.build_duplicate_index(&window).await;

        let now = window.end;
        let items = self.collect_work_items(&window, now, &mut report).await;
        if items.is_empty() {
            info!("no work items found in window");
            return Ok(report);
        }

        let candidates = self.resolve_intervals(items, &mut report);

        // Duplicate check precedes matching so already-recorded items never
        // spend a classification slot.
        let mut fresh = Vec::with_capacity(candidates.len());
        for item in candidates {
            let Some(interval) = item.interval else { continue };
            let start = to_entry_timestamp(interval.start);
            if index.contains(&start, &item.description) {
                info!(item = %item.description, %start, "skipping duplicate: entry already exists");
                report.duplicates += 1;
                continue;
            }
            fresh.push(item);
        }

        if fresh.is_empty() {
            info!("nothing left to match");
            return Ok(report);
        }

        // One batched classification call per run.
        let matches = self.matcher.match_items(&fresh, &catalog).await;

        for item in &fresh {
            let Some(interval) = item.interval else { continue };
            let Some(result) = matches.get(&item.id) else { continue };

            let Some(project_id) = result.project_id.clone() else {
                info!(item = %item.description, reasoning = %result.reasoning, "no suitable match found");
                report.unmatched += 1;
                continue;
            };

            let draft = TimeEntryDraft {
                description: item.description.clone(),
                interval,
                project_id,
                task_id: result.task_id.clone(),
            };
            let start = to_entry_timestamp(interval.start);

            if self.options.dry_run {
                info!(
                    item = %draft.description,
                    %start,
                    end = %to_entry_timestamp(interval.end),
                    project_id = %draft.project_id,
                    "dry run: would create time entry"
                );
                report.would_create += 1;
                index.insert(start, draft.description);
                continue;
            }

            match self.entry_sink.create_entry(&draft).await {
                Ok(()) => {
                    info!(item = %draft.description, %start, "time entry created");
                    report.created += 1;
                    index.insert(start, draft.description);
                }
                Err(e) => {
                    error!(item = %draft.description, error = %e, "failed to create time entry");
                    report.failed_writes += 1;
                }
            }
        }

        info!(?report, "sync run finished");
        Ok(report)
    }

    /// Fetch projects and tasks, applying the target-project filter before
    /// any task fetch or matching occurs.
    async fn build_catalog(&self) -> Result<Catalog> {
        let refs = self.catalog_source.list_projects().await?;

        let mut projects = Vec::new();
        for project_ref in refs {
            if let Some(target) = &self.options.target_project {
                if project_ref.name != *target {
                    continue;
                }
            }
            let tasks = self.catalog_source.list_tasks(&project_ref.id).await?;
            projects.push(Project { id: project_ref.id, name: project_ref.name, tasks });
        }

        let catalog = Catalog::new(projects);
        if catalog.is_empty() {
            return Err(TimeweaveError::Config(match &self.options.target_project {
                Some(target) => format!("no projects found matching '{target}'"),
                None => "no projects found".to_string(),
            }));
        }

        info!(projects = catalog.projects().len(), "catalog ready");
        Ok(catalog)
    }

    /// Query existing entries over the buffered window; on failure, degrade
    /// to an empty index rather than aborting the run.
    async fn build_duplicate_index(&self, window: &SyncWindow) -> DuplicateIndex {
        let buffered = window.with_buffer(DEDUP_BUFFER_DAYS);
        match self.entry_sink.list_entries(&buffered).await {
            Ok(entries) => DuplicateIndex::from_entries(&entries),
            Err(e) => {
                warn!(error = %e, "could not fetch existing entries; duplicate suppression disabled");
                DuplicateIndex::empty()
            }
        }
    }

    /// Fetch and normalize both work-item stages. A failing stage is counted
    /// and skipped; the other stage still runs.
    async fn collect_work_items(
        &self,
        window: &SyncWindow,
        now: DateTime<Utc>,
        report: &mut SyncReport,
    ) -> Vec<WorkItem> {
        let mut items = Vec::new();

        match self.event_source.list_events(window, &self.options.calendar_id).await {
            Ok(events) => {
                let events = events_to_work_items(events);
                info!(count = events.len(), "calendar events collected");
                items.extend(events);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch calendar events; skipping calendar stage");
                report.failed_stages += 1;
            }
        }

        match self.issue_source.list_assigned_issues().await {
            Ok(issues) => {
                let issues = issues_to_work_items(
                    issues,
                    self.options.target_project.as_deref(),
                    window,
                    now,
                );
                info!(count = issues.len(), "eligible issues collected");
                items.extend(issues);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch issues; skipping issue stage");
                report.failed_stages += 1;
            }
        }

        items
    }

    /// Attach allocated intervals to interval-less items; items left without
    /// one (budget exhausted) are reported and dropped from the candidate
    /// set.
    fn resolve_intervals(&self, items: Vec<WorkItem>, report: &mut SyncReport) -> Vec<WorkItem> {
        let consumed = items
            .iter()
            .filter_map(|item| item.interval)
            .fold(Duration::zero(), |acc, interval| acc + interval.duration());

        let allocator = Allocator::new(self.options.workday, consumed);
        let allocations: std::collections::HashMap<_, _> = allocator
            .allocate(&items)
            .into_iter()
            .map(|allocation| (allocation.item_id, allocation.interval))
            .collect();

        let mut resolved = Vec::with_capacity(items.len());
        for mut item in items {
            if item.interval.is_none() {
                match allocations.get(&item.id) {
                    Some(interval) => item.interval = Some(*interval),
                    None => {
                        warn!(item = %item.description, "no remaining daily budget; item skipped");
                        report.skipped_no_budget += 1;
                        continue;
                    }
                }
            }
            resolved.push(item);
        }

        resolved
    }
}
