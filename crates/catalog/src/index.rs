//! CatalogIndex building and indexing logic.
//!
//! This module builds the CatalogIndex from parsed data:
//! - Create primary indices (sake, breweries, tastings)
//! - Build secondary indices (category_index, brewery_index, price_index)
//! - Compute aggregate statistics (brewery stats)

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;

impl CatalogIndex {
    /// Load the entire sake catalog from a directory
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the master files (sake, breweries, tastings)
    /// 2. Build primary indices
    /// 3. Build secondary indices (category, brewery, price)
    /// 4. Compute brewery statistics
    /// 5. Validate data integrity
    ///
    /// The tasting file is optional: a catalog with no recorded tastings
    /// is still a valid catalog.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        println!("Loading sake catalog from {:?}", data_dir);

        // 1. Construct paths to the master files
        let sake_path = data_dir.join("sake_master.json");
        let breweries_path = data_dir.join("brewery_master.json");
        let tastings_path = data_dir.join("tasting_records.json");

        // 2. Parse all three files IN PARALLEL using Rayon
        // Rayon's `join` runs two closures in parallel
        // We nest joins to get three-way parallelism
        let ((sake, breweries), tastings) = rayon::join(
            || {
                // Parse sake and breweries in parallel
                rayon::join(
                    || parser::parse_sake_file(&sake_path),
                    || parser::parse_breweries_file(&breweries_path),
                )
            },
            || {
                if tastings_path.exists() {
                    parser::parse_tastings_file(&tastings_path)
                } else {
                    Ok(Vec::new())
                }
            },
        );

        // Handle errors from parallel parsing
        // The ? operator works because all return Result<Vec<T>>
        let sake = sake?;
        let breweries = breweries?;
        let tastings = tastings?;

        println!(
            "Loaded {} sake, {} breweries, {} tasting records",
            sake.len(),
            breweries.len(),
            tastings.len()
        );

        // 3. Build the CatalogIndex
        let mut index = CatalogIndex::new();

        // Insert all breweries
        for brewery in breweries {
            index.insert_brewery(brewery);
        }

        // Insert all sake
        for entry in sake {
            index.insert_sake(entry);
        }

        // Insert all tasting records (grouped by user, file order preserved)
        for record in tastings {
            index.insert_tasting(record);
        }

        // 4. Build secondary indices (category, brewery, price lookups)
        index.build_secondary_indices();

        // 5. Compute brewery statistics in parallel
        index.compute_brewery_stats();

        // 6. Validate data integrity
        index.validate()?;

        println!("CatalogIndex successfully built and validated!");
        Ok(index)
    }

    /// Build secondary indices after primary data is loaded
    ///
    /// This creates the category_index, brewery_index, and price_index
    /// for fast lookups.
    pub fn build_secondary_indices(&mut self) {
        for (sake_id, sake) in &self.sake {
            // Index by category tag
            self.category_index
                .entry(sake.category.clone())
                .or_insert_with(Vec::new)
                .push(sake_id.clone());

            // Index by brewery
            self.brewery_index
                .entry(sake.brewery_id.clone())
                .or_insert_with(Vec::new)
                .push(sake_id.clone());

            // Index by price (BTreeMap, so range queries stay cheap)
            self.price_index
                .entry(sake.price)
                .or_insert_with(Vec::new)
                .push(sake_id.clone());
        }
    }

    /// Compute aggregate statistics for all breweries
    ///
    /// For each brewery, calculate:
    /// - Number of sake in the catalog
    /// - Average master-data rating across those sake
    pub fn compute_brewery_stats(&mut self) {
        let brewery_stats = self
            .brewery_index
            .par_iter()
            .map(|(brewery_id, sake_ids)| {
                let ratings: Vec<f32> = sake_ids
                    .iter()
                    .filter_map(|id| self.sake.get(id))
                    .map(|s| s.rating)
                    .collect();

                let sake_count = ratings.len() as u32;
                let avg_rating = if sake_count > 0 {
                    ratings.iter().sum::<f32>() / sake_count as f32
                } else {
                    0.0
                };

                (
                    brewery_id.clone(),
                    BreweryStats {
                        sake_count,
                        avg_rating,
                    },
                )
            })
            .collect();
        self.brewery_stats = brewery_stats;
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All sake.brewery_id references exist in breweries
    /// - Sake ratings are in valid range (0.0 - 5.0)
    /// - Sake taste values are in valid range (1 - 5)
    /// - All tasting.sake_id references exist in sake
    /// - Tasting ratings are in valid range (1 - 5)
    ///
    /// Returns Ok(()) if valid, Err if any issues found
    pub fn validate(&self) -> Result<()> {
        for sake in self.sake.values() {
            if !self.breweries.contains_key(&sake.brewery_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Brewery".to_string(),
                    id: sake.brewery_id.clone(),
                });
            }
            if sake.rating < 0.0 || sake.rating > 5.0 {
                return Err(CatalogError::InvalidValue {
                    field: "rating".to_string(),
                    value: sake.rating.to_string(),
                });
            }
            for (field, value) in [
                ("sweetness", sake.sweetness),
                ("acidity", sake.acidity),
                ("richness", sake.richness),
            ] {
                if value < 1 || value > 5 {
                    return Err(CatalogError::InvalidValue {
                        field: field.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        for records in self.user_tastings.values() {
            for record in records {
                if !self.sake.contains_key(&record.sake_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Sake".to_string(),
                        id: record.sake_id.clone(),
                    });
                }
                if record.rating < 1 || record.rating > 5 {
                    return Err(CatalogError::InvalidValue {
                        field: "tasting rating".to_string(),
                        value: record.rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
