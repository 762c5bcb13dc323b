//! # Timeweave Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Task matching with deterministic catalog validation
//! - Time allocation from the daily budget
//! - Duplicate detection over existing entries
//! - Work-item normalization and the sync driver
//!
//! ## Architecture Principles
//! - Only depends on `timeweave-domain`
//! - No HTTP or process code
//! - All external capabilities via traits
//! - Pure, testable business logic

pub mod allocation;
pub mod dedup;
pub mod matching;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use allocation::{Allocation, Allocator};
pub use dedup::DuplicateIndex;
pub use matching::ports::{ClassificationOracle, RawAssignment};
pub use matching::TaskMatcher;
pub use sync::ports::{CatalogSource, EventSource, IssueSource, TimeEntrySink};
pub use sync::{SyncOptions, SyncReport, SyncService};
