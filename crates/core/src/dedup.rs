//! Duplicate detection
//!
//! A candidate entry is a duplicate iff its `(start, description)` signature
//! exactly matches an already-recorded entry. Both sides are normalized to
//! the tracker's canonical second-precision UTC format, so exact string
//! comparison is sufficient; no fuzzy time tolerance is applied.

use std::collections::HashSet;

use timeweave_domain::ExistingEntry;
use tracing::debug;

/// Set of `(start, description)` signatures of recorded time entries.
///
/// Built once per run from a buffered window query; append-only afterwards
/// so entries created during the run also suppress repeats.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    signatures: HashSet<(String, String)>,
}

impl DuplicateIndex {
    /// An empty index; used when the existing-entries query fails and
    /// duplicate suppression degrades to off.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[ExistingEntry]) -> Self {
        let signatures = entries
            .iter()
            .map(|entry| (entry.start.clone(), entry.description.clone()))
            .collect::<HashSet<_>>();
        debug!(count = signatures.len(), "built duplicate index from existing entries");
        Self { signatures }
    }

    pub fn contains(&self, start: &str, description: &str) -> bool {
        self.signatures.contains(&(start.to_string(), description.to_string()))
    }

    pub fn insert(&mut self, start: String, description: String) {
        self.signatures.insert((start, description));
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, description: &str) -> ExistingEntry {
        ExistingEntry { start: start.into(), description: description.into() }
    }

    #[test]
    fn exact_signature_match_is_a_duplicate() {
        let index = DuplicateIndex::from_entries(&[entry("2024-01-01T10:00:00Z", "Daily Standup")]);

        assert!(index.contains("2024-01-01T10:00:00Z", "Daily Standup"));
    }

    #[test]
    fn differing_description_or_start_is_not_a_duplicate() {
        let index = DuplicateIndex::from_entries(&[entry("2024-01-01T10:00:00Z", "Daily Standup")]);

        assert!(!index.contains("2024-01-01T10:00:00Z", "Retro"));
        assert!(!index.contains("2024-01-01T10:00:01Z", "Daily Standup"));
    }

    #[test]
    fn inserted_signatures_are_found() {
        let mut index = DuplicateIndex::empty();
        assert!(index.is_empty());

        index.insert("2024-01-01T12:00:00Z".into(), "#12 Fix login".into());

        assert!(index.contains("2024-01-01T12:00:00Z", "#12 Fix login"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_entries_collapse_into_one_signature() {
        let index = DuplicateIndex::from_entries(&[
            entry("2024-01-01T10:00:00Z", "Daily Standup"),
            entry("2024-01-01T10:00:00Z", "Daily Standup"),
        ]);

        assert_eq!(index.len(), 1);
    }
}
