//! Project/task catalog
//!
//! The catalog is the closed set of valid projects and tasks a work item can
//! be classified against. It is built once per run from the tracker's
//! project listing and is read-only afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A billable task within a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Opaque stable identifier, unique across the whole catalog.
    pub id: String,
    /// Display name, not required to be unique.
    pub name: String,
}

/// A project and its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub tasks: Vec<Task>,
}

/// Immutable snapshot of valid projects and tasks.
///
/// Carries a task-id to project-id index so ownership validation is O(1)
/// per lookup instead of a linear scan over every project.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    task_owners: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog from a project listing, indexing task ownership.
    pub fn new(projects: Vec<Project>) -> Self {
        let mut task_owners = HashMap::new();
        for project in &projects {
            for task in &project.tasks {
                task_owners.insert(task.id.clone(), project.id.clone());
            }
        }
        Self { projects, task_owners }
    }

    /// All projects in the catalog, in listing order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Owning project id for a task id, if the task exists.
    pub fn owner_of(&self, task_id: &str) -> Option<&str> {
        self.task_owners.get(task_id).map(String::as_str)
    }

    /// Whether a project id exists in the catalog.
    pub fn contains_project(&self, project_id: &str) -> bool {
        self.projects.iter().any(|p| p.id == project_id)
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
