//! Sync orchestration

pub mod items;
pub mod ports;
pub mod service;

pub use service::{SyncOptions, SyncReport, SyncService};
