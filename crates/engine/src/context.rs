//! Request context threaded through the filtering and scoring pipeline.
//!
//! This module aggregates the raw tasting history into a summary with O(1)
//! lookups, so filters and scorers never rescan the history per candidate.

use crate::profile::PreferenceProfile;
use catalog::{BreweryId, SakeId};
use std::collections::HashSet;

/// One entry of a user's tasting history, already joined against the catalog
#[derive(Debug, Clone)]
pub struct TastingHistoryEntry {
    pub sake_id: SakeId,
    pub brewery_id: BreweryId,
}

/// Aggregated view of a user's tasting history
#[derive(Debug, Clone, Default)]
pub struct TastingSummary {
    /// Sake the user has already tried
    pub tasted_sake: HashSet<SakeId>,
    /// Breweries the user has already tried
    pub tasted_breweries: HashSet<BreweryId>,
    /// How many raw history entries went into this summary
    pub entry_count: usize,
}

impl TastingSummary {
    /// Aggregate raw history entries into lookup sets
    pub fn from_entries(entries: &[TastingHistoryEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            summary.tasted_sake.insert(entry.sake_id.clone());
            summary.tasted_breweries.insert(entry.brewery_id.clone());
        }
        summary.entry_count = entries.len();
        summary
    }

    /// True when the user has no recorded tastings
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Read-only context for one recommendation request.
///
/// Holds the preference profile and the history summary; every filter and
/// scorer reads from here.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub profile: PreferenceProfile,
    pub history: TastingSummary,
}

impl RequestContext {
    pub fn new(profile: PreferenceProfile, history: TastingSummary) -> Self {
        Self { profile, history }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sake_id: &str, brewery_id: &str) -> TastingHistoryEntry {
        TastingHistoryEntry {
            sake_id: sake_id.to_string(),
            brewery_id: brewery_id.to_string(),
        }
    }

    #[test]
    fn test_summary_aggregates_entries() {
        let entries = vec![
            entry("sake-001", "brewery-001"),
            entry("sake-002", "brewery-001"),
            entry("sake-003", "brewery-002"),
        ];

        let summary = TastingSummary::from_entries(&entries);

        assert_eq!(summary.entry_count, 3);
        assert_eq!(summary.tasted_sake.len(), 3);
        // Two entries share a brewery
        assert_eq!(summary.tasted_breweries.len(), 2);
        assert!(summary.tasted_sake.contains("sake-002"));
        assert!(summary.tasted_breweries.contains("brewery-002"));
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_summary_dedupes_repeat_tastings() {
        // The same sake tasted twice counts once in the sets
        let entries = vec![
            entry("sake-001", "brewery-001"),
            entry("sake-001", "brewery-001"),
        ];

        let summary = TastingSummary::from_entries(&entries);

        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.tasted_sake.len(), 1);
        assert_eq!(summary.tasted_breweries.len(), 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = TastingSummary::from_entries(&[]);

        assert!(summary.is_empty());
        assert_eq!(summary.entry_count, 0);
        assert!(summary.tasted_sake.is_empty());
    }
}
