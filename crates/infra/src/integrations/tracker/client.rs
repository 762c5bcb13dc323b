/// Tracker REST API client
use async_trait::async_trait;
use reqwest::Method;
use timeweave_core::sync::ports::{CatalogSource, TimeEntrySink};
use timeweave_domain::{
    to_entry_timestamp, ExistingEntry, ProjectRef, Result, SyncWindow, Task, TimeEntryDraft,
    TimeweaveError,
};
use tracing::{debug, info};

use crate::http::HttpClient;

use super::types::{CreateEntryRequest, ProjectDto, TaskDto, TimeEntryDto, UserDto};

/// Entries per page when listing existing time entries; large enough to
/// cover a buffered window in one request.
const ENTRIES_PAGE_SIZE: u32 = 1000;

/// Client for the time-tracker's workspace-scoped REST API.
pub struct TrackerClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    workspace_id: String,
}

impl TrackerClient {
    pub fn new(
        http_client: HttpClient,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            workspace_id: workspace_id.into(),
        }
    }

    fn workspace_url(&self, suffix: &str) -> String {
        format!("{}/workspaces/{}/{}", self.base_url, self.workspace_id, suffix)
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self
            .http_client
            .request(Method::GET, url)
            .header("X-Api-Key", &self.api_key)
            .query(query);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TimeweaveError::Network(format!(
                "tracker API error ({status}): {body}"
            )));
        }

        response.json().await.map_err(|e| {
            TimeweaveError::InvalidInput(format!("failed to parse tracker response: {e}"))
        })
    }

    /// The tracker scopes the time-entries listing to a user id.
    async fn current_user_id(&self) -> Result<String> {
        let user: UserDto = self.get_json(&format!("{}/user", self.base_url), &[]).await?;
        debug!(user_id = %user.id, "resolved current tracker user");
        Ok(user.id)
    }
}

#[async_trait]
impl CatalogSource for TrackerClient {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>> {
        let projects: Vec<ProjectDto> =
            self.get_json(&self.workspace_url("projects"), &[]).await?;
        debug!(count = projects.len(), "fetched tracker projects");
        Ok(projects.into_iter().map(|p| ProjectRef { id: p.id, name: p.name }).collect())
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        let tasks: Vec<TaskDto> = self
            .get_json(&self.workspace_url(&format!("projects/{project_id}/tasks")), &[])
            .await?;
        Ok(tasks.into_iter().map(|t| Task { id: t.id, name: t.name }).collect())
    }
}

#[async_trait]
impl TimeEntrySink for TrackerClient {
    async fn list_entries(&self, window: &SyncWindow) -> Result<Vec<ExistingEntry>> {
        let user_id = self.current_user_id().await?;
        let url = self.workspace_url(&format!("user/{user_id}/time-entries"));
        let query = [
            ("start", to_entry_timestamp(window.start)),
            ("end", to_entry_timestamp(window.end)),
            ("page-size", ENTRIES_PAGE_SIZE.to_string()),
        ];

        let entries: Vec<TimeEntryDto> = self.get_json(&url, &query).await?;
        debug!(count = entries.len(), "fetched existing time entries");

        Ok(entries
            .into_iter()
            .map(|entry| ExistingEntry {
                start: entry.time_interval.start,
                description: entry.description,
            })
            .collect())
    }

    async fn create_entry(&self, draft: &TimeEntryDraft) -> Result<()> {
        let payload = CreateEntryRequest {
            description: draft.description.clone(),
            start: to_entry_timestamp(draft.interval.start),
            end: to_entry_timestamp(draft.interval.end),
            project_id: draft.project_id.clone(),
            task_id: draft.task_id.clone(),
        };

        let request = self
            .http_client
            .request(Method::POST, self.workspace_url("time-entries"))
            .header("X-Api-Key", &self.api_key)
            .json(&payload);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            // Surface the body so per-item write failures are diagnosable.
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TimeweaveError::Write(format!("tracker rejected entry ({status}): {body}")));
        }

        info!(description = %draft.description, "time entry accepted by tracker");
        Ok(())
    }
}
