/// Wire types for the tracker REST API
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeEntryDto {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "timeInterval")]
    pub time_interval: TimeIntervalDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeIntervalDto {
    pub start: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateEntryRequest {
    pub description: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "taskId")]
    pub task_id: Option<String>,
}
