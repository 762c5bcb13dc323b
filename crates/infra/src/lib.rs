//! # Timeweave Infrastructure
//!
//! Adapters over the external collaborators:
//! - Shared HTTP client
//! - Configuration loading
//! - Tracker, calendar, issue tracker, and OpenAI integrations

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::calendar::CalendarClient;
pub use integrations::issues::IssueTrackerClient;
pub use integrations::openai::OpenAiClient;
pub use integrations::tracker::TrackerClient;
