//! Issue tracker integration
//!
//! Implements the `IssueSource` port over the issue tracker's GraphQL API.
//! Project-board memberships (and their status text) only surface through
//! GraphQL, so the whole listing is one query.

mod client;
mod types;

pub use client::IssueTrackerClient;
