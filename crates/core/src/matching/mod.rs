//! Work-item to task matching

pub mod matcher;
pub mod ports;

pub use matcher::TaskMatcher;
pub use ports::{ClassificationOracle, RawAssignment};
