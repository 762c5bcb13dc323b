//! Time-tracker REST integration
//!
//! Implements the `CatalogSource` and `TimeEntrySink` ports over the
//! tracker's workspace-scoped REST API.

mod client;
mod types;

pub use client::TrackerClient;
