//! Configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::WORKDAY_HOURS;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub calendar: CalendarConfig,
    pub issues: IssueTrackerConfig,
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Time-tracker API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub api_key: String,
    pub workspace_id: String,
    #[serde(default = "default_tracker_base_url")]
    pub base_url: String,
}

/// Calendar provider access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Bearer token; obtaining it is outside this tool's responsibility.
    pub access_token: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_calendar_base_url")]
    pub base_url: String,
}

/// Issue tracker access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTrackerConfig {
    pub token: String,
    #[serde(default = "default_issues_base_url")]
    pub base_url: String,
}

/// Classification oracle access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

/// Sync behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Restrict the catalog (and issue status checks) to this project name.
    #[serde(default)]
    pub target_project: Option<String>,
    /// Daily budget in hours for allocating interval-less items.
    #[serde(default = "default_workday_hours")]
    pub workday_hours: i64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { target_project: None, workday_hours: WORKDAY_HOURS }
    }
}

fn default_tracker_base_url() -> String {
    "https://api.clockify.me/api/v1".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_calendar_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_issues_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_workday_hours() -> i64 {
    WORKDAY_HOURS
}
