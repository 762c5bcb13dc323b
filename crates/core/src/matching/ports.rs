//! Port interface for the classification oracle

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use timeweave_domain::Result;

/// A raw, untrusted project/task assignment for one work item.
///
/// This is what the oracle claims; the matcher validates it against the
/// catalog before anything downstream may act on it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAssignment {
    pub reasoning: Option<String>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
}

/// Trait for the external natural-language classifier.
///
/// Given a textual catalog listing and a textual item listing, returns a
/// best-effort assignment keyed by work-item id. Non-deterministic; a
/// deterministic fake is substituted in tests.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    async fn classify(
        &self,
        catalog_listing: &str,
        item_listing: &str,
    ) -> Result<HashMap<String, RawAssignment>>;
}
