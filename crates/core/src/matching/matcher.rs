//! Task matcher
//!
//! Matching is split into a best-effort semantic layer (the oracle, replaceable
//! and non-deterministic) and a deterministic validation layer that guarantees
//! every returned identifier pair is referentially consistent with the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use timeweave_domain::{Catalog, MatchResult, WorkItem};
use tracing::{debug, warn};

use super::ports::{ClassificationOracle, RawAssignment};

/// Matches work items to catalog tasks via the classification oracle.
pub struct TaskMatcher {
    oracle: Arc<dyn ClassificationOracle>,
}

impl TaskMatcher {
    pub fn new(oracle: Arc<dyn ClassificationOracle>) -> Self {
        Self { oracle }
    }

    /// Match a batch of work items against the catalog.
    ///
    /// One oracle call per batch. The returned mapping always contains an
    /// entry for every input item id. On any oracle failure the whole batch
    /// degrades to unmatched results rather than trusting partial output.
    pub async fn match_items(
        &self,
        items: &[WorkItem],
        catalog: &Catalog,
    ) -> HashMap<String, MatchResult> {
        if items.is_empty() {
            return HashMap::new();
        }

        let catalog_listing = render_catalog(catalog);
        let item_listing = render_items(items);

        let raw = match self.oracle.classify(&catalog_listing, &item_listing).await {
            Ok(assignments) => assignments,
            Err(e) => {
                warn!(error = %e, item_count = items.len(), "classification failed; batch unmatched");
                return items
                    .iter()
                    .map(|item| {
                        (
                            item.id.clone(),
                            MatchResult::unmatched(format!("classification unavailable: {e}")),
                        )
                    })
                    .collect();
            }
        };

        items
            .iter()
            .map(|item| {
                let result = match raw.get(&item.id) {
                    Some(assignment) => validate(&item.id, assignment.clone(), catalog),
                    None => {
                        debug!(item_id = %item.id, "classifier omitted item from response");
                        MatchResult::unmatched("classifier returned no assignment for this item")
                    }
                };
                (item.id.clone(), result)
            })
            .collect()
    }
}

/// Validate one raw assignment against the catalog.
///
/// The task id is authoritative: an unknown task id voids the assignment,
/// and a known task id forces the project id to the task's true owner.
/// The oracle's project guess is advisory only.
fn validate(item_id: &str, raw: RawAssignment, catalog: &Catalog) -> MatchResult {
    let reasoning = raw.reasoning.unwrap_or_default();

    let Some(task_id) = raw.task_id else {
        // Project-only assignment: keep it if the project exists, otherwise
        // void it. Nothing is ever fabricated or fuzzy-corrected.
        return match raw.project_id {
            Some(project_id) if catalog.contains_project(&project_id) => {
                MatchResult { project_id: Some(project_id), task_id: None, reasoning }
            }
            Some(project_id) => {
                warn!(item_id, project_id = %project_id, "classifier returned unknown project id");
                MatchResult::unmatched(format!("unknown project id '{project_id}' returned by classifier"))
            }
            None => MatchResult { project_id: None, task_id: None, reasoning },
        };
    };

    match catalog.owner_of(&task_id) {
        None => {
            warn!(item_id, task_id = %task_id, "classifier returned unknown task id; voiding assignment");
            MatchResult::unmatched(format!("unknown task id '{task_id}' returned by classifier"))
        }
        Some(owner) => {
            if raw.project_id.as_deref() != Some(owner) {
                warn!(
                    item_id,
                    task_id = %task_id,
                    claimed = raw.project_id.as_deref().unwrap_or("none"),
                    owner,
                    "classifier project id disagrees with catalog; using catalog owner"
                );
            }
            MatchResult { project_id: Some(owner.to_string()), task_id: Some(task_id), reasoning }
        }
    }
}

/// Serialize the catalog into the candidate listing sent to the oracle.
fn render_catalog(catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    for project in catalog.projects() {
        for task in &project.tasks {
            lines.push(format!(
                "Project: {} (ID: {}) | Task: {} (ID: {})",
                project.name, project.id, task.name, task.id
            ));
        }
    }
    lines.join("\n")
}

/// Serialize the item batch into the listing sent to the oracle.
fn render_items(items: &[WorkItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}: {}", item.id, item.description))
        .collect::<Vec<_>>()
        .join("\n")
}
