//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TIMEWEAVE_TRACKER_API_KEY`: Time-tracker API key (required)
//! - `TIMEWEAVE_TRACKER_WORKSPACE_ID`: Tracker workspace id (required)
//! - `TIMEWEAVE_TRACKER_BASE_URL`: Tracker API base URL (optional)
//! - `TIMEWEAVE_CALENDAR_TOKEN`: Calendar bearer token (required)
//! - `TIMEWEAVE_CALENDAR_ID`: Calendar to read (optional, default "primary")
//! - `TIMEWEAVE_CALENDAR_BASE_URL`: Calendar API base URL (optional)
//! - `TIMEWEAVE_ISSUES_TOKEN`: Issue tracker token (required)
//! - `TIMEWEAVE_ISSUES_BASE_URL`: Issue tracker base URL (optional)
//! - `TIMEWEAVE_OPENAI_API_KEY`: OpenAI API key (required)
//! - `TIMEWEAVE_OPENAI_MODEL`: Model name (optional)
//! - `TIMEWEAVE_PROJECT_NAME`: Restrict sync to this project (optional)
//! - `TIMEWEAVE_WORKDAY_HOURS`: Daily allocation budget (optional, default 8)

use std::path::{Path, PathBuf};

use timeweave_domain::{
    CalendarConfig, Config, IssueTrackerConfig, OpenAiConfig, Result, SyncSettings,
    TimeweaveError, TrackerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `TimeweaveError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let workday_hours = match std::env::var("TIMEWEAVE_WORKDAY_HOURS") {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|e| TimeweaveError::Config(format!("Invalid workday hours: {e}")))?,
        Err(_) => SyncSettings::default().workday_hours,
    };

    Ok(Config {
        tracker: TrackerConfig {
            api_key: env_var("TIMEWEAVE_TRACKER_API_KEY")?,
            workspace_id: env_var("TIMEWEAVE_TRACKER_WORKSPACE_ID")?,
            base_url: env_or("TIMEWEAVE_TRACKER_BASE_URL", "https://api.clockify.me/api/v1"),
        },
        calendar: CalendarConfig {
            access_token: env_var("TIMEWEAVE_CALENDAR_TOKEN")?,
            calendar_id: env_or("TIMEWEAVE_CALENDAR_ID", "primary"),
            base_url: env_or(
                "TIMEWEAVE_CALENDAR_BASE_URL",
                "https://www.googleapis.com/calendar/v3",
            ),
        },
        issues: IssueTrackerConfig {
            token: env_var("TIMEWEAVE_ISSUES_TOKEN")?,
            base_url: env_or("TIMEWEAVE_ISSUES_BASE_URL", "https://api.github.com"),
        },
        openai: OpenAiConfig {
            api_key: env_var("TIMEWEAVE_OPENAI_API_KEY")?,
            model: env_or("TIMEWEAVE_OPENAI_MODEL", "gpt-4o-mini"),
        },
        sync: SyncSettings {
            target_project: std::env::var("TIMEWEAVE_PROJECT_NAME").ok(),
            workday_hours,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the working directory for
/// `timeweave.{json,toml}` / `config.{json,toml}`. Format is detected by
/// file extension.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TimeweaveError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TimeweaveError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TimeweaveError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TimeweaveError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TimeweaveError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TimeweaveError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let candidates = vec![
        cwd.join("timeweave.json"),
        cwd.join("timeweave.toml"),
        cwd.join("config.json"),
        cwd.join("config.toml"),
    ];
    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TimeweaveError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
