//! Core domain types for the sake master data.
//!
//! This module defines the fundamental data structures used throughout the
//! system: the master-data records themselves, plus the [`CatalogIndex`]
//! that holds them in memory with secondary indices for fast lookups.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up entity ids

/// Unique identifier for a sake (e.g. "sake-001")
pub type SakeId = String;

/// Unique identifier for a brewery (e.g. "brewery-001")
pub type BreweryId = String;

/// Unique identifier for a user
pub type UserId = String;

// =============================================================================
// Master-data Types
// =============================================================================

fn default_taste_value() -> u8 {
    3
}

fn default_rating() -> f32 {
    3.0
}

/// One sake entry from the master data.
///
/// Taste attributes use a 1-5 scale (3 = neutral) and default to 3 when a
/// master record omits them; `rating` defaults to 3.0. The trailing fields
/// (`description` onwards) are display metadata the scoring pipeline never
/// reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sake {
    pub sake_id: SakeId,
    pub name: String,
    pub brewery_id: BreweryId,
    /// Category tag, e.g. "junmai", "daiginjo", "junmai_ginjo"
    pub category: String,
    /// Price in yen
    #[serde(default)]
    pub price: u32,
    #[serde(default = "default_taste_value")]
    pub sweetness: u8,
    #[serde(default = "default_taste_value")]
    pub acidity: u8,
    #[serde(default = "default_taste_value")]
    pub richness: u8,
    /// Average user rating on a 0-5 scale
    #[serde(default = "default_rating")]
    pub rating: f32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alcohol_content: Option<f32>,
    #[serde(default)]
    pub rice_polishing_ratio: Option<u8>,
    #[serde(default)]
    pub food_pairings: Vec<String>,
}

/// One brewery entry from the master data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brewery {
    pub brewery_id: BreweryId,
    pub name: String,
    pub prefecture: String,
    pub city: String,
    #[serde(default)]
    pub established_year: Option<u16>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// A single tasting record: one user tried one sake.
///
/// Records are kept most-recent-first per user, matching the order the
/// tasting store returns them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingRecord {
    pub record_id: String,
    pub user_id: UserId,
    pub sake_id: SakeId,
    /// Rating the user gave, 1-5
    pub rating: u8,
    #[serde(default)]
    pub notes: Option<String>,
    /// ISO-8601 date of the tasting, if recorded
    #[serde(default)]
    pub tasted_at: Option<String>,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a brewery
///
/// These are computed once when loading data for fast lookups later
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BreweryStats {
    /// Number of sake this brewery has in the catalog
    pub sake_count: u32,
    /// Average master-data rating across the brewery's sake
    pub avg_rating: f32,
}

// =============================================================================
// CatalogIndex - The Core In-Memory Store
// =============================================================================

/// Main data structure that holds all master data and indices.
///
/// This is the heart of the catalog crate. It provides O(1) lookups for
/// sake, breweries, and per-user tasting records through HashMap indices,
/// plus a price BTreeMap for budget range queries.
#[derive(Debug)]
pub struct CatalogIndex {
    // Primary data stores
    pub(crate) sake: HashMap<SakeId, Sake>,
    pub(crate) breweries: HashMap<BreweryId, Brewery>,

    /// Tasting records grouped by user, most recent first
    pub(crate) user_tastings: HashMap<UserId, Vec<TastingRecord>>,

    // Secondary indices for specialized queries
    /// Sake grouped by category tag
    pub(crate) category_index: HashMap<String, Vec<SakeId>>,
    /// Sake grouped by brewery
    pub(crate) brewery_index: HashMap<BreweryId, Vec<SakeId>>,
    /// Sake grouped by price (sorted, for budget range queries)
    pub(crate) price_index: BTreeMap<u32, Vec<SakeId>>,

    // Precomputed statistics
    pub(crate) brewery_stats: HashMap<BreweryId, BreweryStats>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self {
            sake: HashMap::new(),
            breweries: HashMap::new(),
            user_tastings: HashMap::new(),
            category_index: HashMap::new(),
            brewery_index: HashMap::new(),
            price_index: BTreeMap::new(),
            brewery_stats: HashMap::new(),
        }
    }

    // Getters - these return references into the index, not owned values

    /// Get a sake by id
    pub fn get_sake(&self, id: &str) -> Option<&Sake> {
        self.sake.get(id)
    }

    /// Get a brewery by id
    pub fn get_brewery(&self, id: &str) -> Option<&Brewery> {
        self.breweries.get(id)
    }

    /// Get a user's tasting records, most recent first
    ///
    /// Returns an empty slice if the user has no records
    pub fn get_tastings(&self, user_id: &str) -> &[TastingRecord] {
        self.user_tastings
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all sake ids in a specific category
    pub fn sake_in_category(&self, category: &str) -> &[SakeId] {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all sake ids produced by a brewery
    pub fn sake_by_brewery(&self, brewery_id: &str) -> &[SakeId] {
        self.brewery_index
            .get(brewery_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all sake ids priced at or below `budget` yen
    pub fn sake_within_budget(&self, budget: u32) -> Vec<SakeId> {
        self.price_index
            .range(..=budget)
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }

    /// Get precomputed statistics for a brewery
    pub fn get_brewery_stats(&self, brewery_id: &str) -> Option<&BreweryStats> {
        self.brewery_stats.get(brewery_id)
    }

    /// Iterate over every sake in the catalog (arbitrary order)
    pub fn all_sake(&self) -> impl Iterator<Item = &Sake> {
        self.sake.values()
    }

    // Mutators - used during data loading and in test fixtures

    /// Insert a sake into the index
    pub fn insert_sake(&mut self, sake: Sake) {
        self.sake.insert(sake.sake_id.clone(), sake);
    }

    /// Insert a brewery into the index
    pub fn insert_brewery(&mut self, brewery: Brewery) {
        self.breweries.insert(brewery.brewery_id.clone(), brewery);
    }

    /// Append a tasting record to its user's history
    pub fn insert_tasting(&mut self, record: TastingRecord) {
        self.user_tastings
            .entry(record.user_id.clone())
            .or_insert_with(Vec::new)
            .push(record);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_tastings = self.user_tastings.values().map(|v| v.len()).sum();
        (self.sake.len(), self.breweries.len(), total_tastings)
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
