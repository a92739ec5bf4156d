//! # Recommendation Service
//!
//! This module wraps the pure recommendation engine with the request-level
//! concerns a caller needs handled:
//! 1. Validate the request (non-empty user id, sane limit)
//! 2. Materialize the user's tasting history from the catalog
//! 3. Run the engine on a blocking thread (rayon work must not stall tokio)
//! 4. Package the ranked candidates into a response

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use catalog::{CatalogIndex, Sake, TastingRecord};
use engine::{PreferenceProfile, ScoredCandidate, TastingHistoryEntry};

/// Hard ceiling on the number of recommendations a single request may ask for.
pub const MAX_LIMIT: usize = 50;

/// Limit applied when a request omits the `limit` field.
pub const DEFAULT_LIMIT: usize = 10;

/// Only the most recent tasting records count toward diversity and
/// already-tasted filtering. Older history stops being a useful signal.
pub const HISTORY_WINDOW: usize = 50;

/// Request-level validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user_id must not be empty")]
    EmptyUserId,
}

/// A recommendation request as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: String,
    #[serde(default)]
    pub preferences: PreferenceProfile,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// The ranked recommendations returned to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredCandidate>,
    pub count: usize,
}

/// Serves recommendation requests against a shared catalog.
///
/// The catalog snapshot handed to the engine is built once at construction
/// time, so each request only pays for filtering and scoring.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<CatalogIndex>,
    sake_list: Arc<Vec<Sake>>,
}

impl RecommendationService {
    /// Create a service over a loaded catalog.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        let sake_list = Arc::new(catalog.all_sake().cloned().collect::<Vec<_>>());
        Self { catalog, sake_list }
    }

    /// Main entry point: serve one recommendation request.
    ///
    /// # Returns
    /// A response whose candidates are sorted by score (highest first).
    pub async fn recommend(&self, request: RecommendRequest) -> Result<RecommendResponse> {
        // Start timing
        let start_time = Instant::now();

        // Validate the request
        if request.user_id.trim().is_empty() {
            return Err(ServiceError::EmptyUserId.into());
        }
        let limit = if request.limit > MAX_LIMIT {
            warn!(
                "Requested limit {} exceeds maximum, clamping to {}",
                request.limit, MAX_LIMIT
            );
            MAX_LIMIT
        } else {
            // A limit of zero stays zero here so the engine rejects it.
            request.limit
        };

        // Materialize tasting history
        let history = self.build_history(&request.user_id);
        info!(
            "Built tasting history for user {} ({} entries)",
            request.user_id,
            history.len()
        );

        // Run the engine off the async runtime
        let profile = request.preferences;
        let sake_list = Arc::clone(&self.sake_list);
        let recommendations = tokio::task::spawn_blocking(move || {
            engine::recommend(&profile, &sake_list, &history, limit)
        })
        .await
        .context("Recommendation task panicked")??;
        info!(
            "Selected {} recommendations for user {}",
            recommendations.len(),
            request.user_id
        );

        // Log total time
        let elapsed = start_time.elapsed();
        info!(
            "Total time to serve user {}: {:.2?}",
            request.user_id, elapsed
        );

        let count = recommendations.len();
        Ok(RecommendResponse {
            recommendations,
            count,
        })
    }

    /// Build the engine's history view from the user's tasting records.
    ///
    /// Takes the most recent [`HISTORY_WINDOW`] records (newest `tasted_at`
    /// first, undated records last) and resolves each sake to its brewery.
    /// Records pointing at a sake missing from the catalog are skipped with
    /// a warning. An unknown user simply has no history.
    fn build_history(&self, user_id: &str) -> Vec<TastingHistoryEntry> {
        let mut records: Vec<&TastingRecord> = self.catalog.get_tastings(user_id).iter().collect();
        records.sort_by(|a, b| b.tasted_at.cmp(&a.tasted_at));
        records.truncate(HISTORY_WINDOW);

        records
            .into_iter()
            .filter_map(|record| match self.catalog.get_sake(&record.sake_id) {
                Some(sake) => Some(TastingHistoryEntry {
                    sake_id: record.sake_id.clone(),
                    brewery_id: sake.brewery_id.clone(),
                }),
                None => {
                    warn!(
                        "Tasting record {} references unknown sake {}, skipping",
                        record.record_id, record.sake_id
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Brewery;
    use engine::{EngineError, ExperienceLevel};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn sake(id: &str, brewery: &str, category: &str, price: u32, rating: f32) -> Sake {
        Sake {
            sake_id: id.to_string(),
            name: format!("Sake {id}"),
            brewery_id: brewery.to_string(),
            category: category.to_string(),
            price,
            sweetness: 3,
            acidity: 3,
            richness: 3,
            rating,
            description: None,
            alcohol_content: None,
            rice_polishing_ratio: None,
            food_pairings: Vec::new(),
        }
    }

    fn brewery(id: &str, name: &str) -> Brewery {
        Brewery {
            brewery_id: id.to_string(),
            name: name.to_string(),
            prefecture: "新潟県".to_string(),
            city: "長岡市".to_string(),
            established_year: Some(1830),
            description: None,
            website: None,
        }
    }

    fn tasting(record_id: &str, user_id: &str, sake_id: &str, tasted_at: &str) -> TastingRecord {
        TastingRecord {
            record_id: record_id.to_string(),
            user_id: user_id.to_string(),
            sake_id: sake_id.to_string(),
            rating: 4,
            notes: None,
            tasted_at: Some(tasted_at.to_string()),
        }
    }

    /// A small catalog: six sake across three breweries, one user with history.
    fn build_test_catalog() -> Arc<CatalogIndex> {
        let mut index = CatalogIndex::new();

        index.insert_brewery(brewery("brewery-001", "朝日酒造"));
        index.insert_brewery(brewery("brewery-002", "八海醸造"));
        index.insert_brewery(brewery("brewery-003", "土佐鶴酒造"));

        index.insert_sake(sake("sake-001", "brewery-001", "junmai", 1400, 5.0));
        index.insert_sake(sake("sake-002", "brewery-001", "junmai_daiginjo", 5280, 4.5));
        index.insert_sake(sake("sake-003", "brewery-002", "honjozo", 980, 3.5));
        index.insert_sake(sake("sake-004", "brewery-002", "daiginjo", 3800, 4.2));
        index.insert_sake(sake("sake-005", "brewery-003", "futsushu", 750, 3.0));
        index.insert_sake(sake("sake-006", "brewery-003", "koshu", 4200, 3.8));

        index.insert_tasting(tasting("rec-001", "user-001", "sake-001", "2024-03-10"));
        index.insert_tasting(tasting("rec-002", "user-001", "sake-003", "2024-02-18"));

        Arc::new(index)
    }

    fn service() -> RecommendationService {
        RecommendationService::new(build_test_catalog())
    }

    fn request(user_id: &str, limit: usize) -> RecommendRequest {
        RecommendRequest {
            user_id: user_id.to_string(),
            preferences: PreferenceProfile::default(),
            limit,
        }
    }

    // ============================================================================
    // Validation
    // ============================================================================

    #[tokio::test]
    async fn test_empty_user_id_is_rejected() {
        let service = service();

        let err = service
            .recommend(request("", 10))
            .await
            .expect_err("empty user_id should fail");
        assert!(matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::EmptyUserId)
        ));

        // Whitespace-only ids are just as empty
        let err = service
            .recommend(request("   ", 10))
            .await
            .expect_err("blank user_id should fail");
        assert!(matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::EmptyUserId)
        ));
    }

    #[tokio::test]
    async fn test_zero_limit_propagates_engine_error() {
        let service = service();

        let err = service
            .recommend(request("user-001", 0))
            .await
            .expect_err("zero limit should fail");
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidLimit { limit: 0 })
        ));
    }

    #[tokio::test]
    async fn test_limit_is_clamped_to_maximum() {
        let mut index = CatalogIndex::new();
        index.insert_brewery(brewery("brewery-001", "朝日酒造"));
        for i in 0..60 {
            index.insert_sake(sake(
                &format!("sake-{i:03}"),
                "brewery-001",
                "junmai",
                1000 + i,
                4.0,
            ));
        }
        let service = RecommendationService::new(Arc::new(index));

        let response = service
            .recommend(request("user-001", 500))
            .await
            .expect("recommend failed");

        assert_eq!(response.count, MAX_LIMIT, "limit should clamp to {MAX_LIMIT}");
    }

    // ============================================================================
    // History Materialization
    // ============================================================================

    #[tokio::test]
    async fn test_unknown_user_gets_recommendations_from_empty_history() {
        let service = service();

        let response = service
            .recommend(request("user-999", 10))
            .await
            .expect("recommend failed");

        // No history means nothing is excluded
        assert_eq!(response.count, 6);
    }

    #[tokio::test]
    async fn test_tasted_sake_excluded_from_results() {
        let service = service();

        let response = service
            .recommend(request("user-001", 10))
            .await
            .expect("recommend failed");

        assert_eq!(response.count, 4);
        let ids: Vec<&str> = response
            .recommendations
            .iter()
            .map(|r| r.sake_id.as_str())
            .collect();
        assert!(!ids.contains(&"sake-001"));
        assert!(!ids.contains(&"sake-003"));
    }

    #[tokio::test]
    async fn test_history_window_keeps_most_recent_records() {
        let mut index = CatalogIndex::new();
        index.insert_brewery(brewery("brewery-001", "朝日酒造"));
        for i in 0..60 {
            let id = format!("sake-{i:03}");
            index.insert_sake(sake(&id, "brewery-001", "junmai", 1000, 4.0));
            // Later index = later tasting date, so sake-010..sake-059 fall
            // inside the window and sake-000..sake-009 age out of it.
            index.insert_tasting(tasting(
                &format!("rec-{i:03}"),
                "user-001",
                &id,
                &format!("2024-01-{:02}T{:02}:00:00", 1 + i / 24, i % 24),
            ));
        }
        let service = RecommendationService::new(Arc::new(index));

        let response = service
            .recommend(request("user-001", 20))
            .await
            .expect("recommend failed");

        // Only the ten oldest-tasted sake are eligible again
        assert_eq!(response.count, 10);
        for rec in &response.recommendations {
            let n: usize = rec.sake_id["sake-".len()..].parse().unwrap();
            assert!(n < 10, "{} should have aged out of the window", rec.sake_id);
        }
    }

    #[tokio::test]
    async fn test_unresolvable_history_records_are_skipped() {
        let mut index = CatalogIndex::new();
        index.insert_brewery(brewery("brewery-001", "朝日酒造"));
        index.insert_sake(sake("sake-001", "brewery-001", "junmai", 1400, 4.0));
        index.insert_sake(sake("sake-002", "brewery-001", "junmai_ginjo", 2600, 4.2));
        index.insert_tasting(tasting("rec-001", "user-001", "sake-001", "2024-03-01"));
        index.insert_tasting(tasting("rec-002", "user-001", "sake-404", "2024-03-02"));
        let service = RecommendationService::new(Arc::new(index));

        let response = service
            .recommend(request("user-001", 10))
            .await
            .expect("recommend failed");

        // The dangling record is dropped, the valid one still excludes
        assert_eq!(response.count, 1);
        assert_eq!(response.recommendations[0].sake_id, "sake-002");
    }

    // ============================================================================
    // End to End
    // ============================================================================

    #[tokio::test]
    async fn test_recommend_returns_ranked_response() {
        let service = service();

        let response = service
            .recommend(RecommendRequest {
                user_id: "user-999".to_string(),
                preferences: PreferenceProfile {
                    budget: Some(4000),
                    experience_level: Some(ExperienceLevel::Intermediate),
                    ..Default::default()
                },
                limit: 3,
            })
            .await
            .expect("recommend failed");

        assert_eq!(response.count, 3);
        assert_eq!(response.count, response.recommendations.len());
        for pair in response.recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score, "response must be ranked");
        }
        for rec in &response.recommendations {
            assert!(rec.price <= 4000);
            assert!(!rec.match_reason.is_empty());
        }
    }

    #[tokio::test]
    async fn test_request_json_applies_defaults() {
        let request: RecommendRequest =
            serde_json::from_str(r#"{"user_id": "user-001"}"#).expect("parse failed");

        assert_eq!(request.user_id, "user-001");
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.preferences.sweetness, 3);
        assert_eq!(request.preferences.budget, None);

        let request: RecommendRequest = serde_json::from_str(
            r#"{"user_id": "user-002", "preferences": {"sweetness": 5, "budget": 2000}, "limit": 25}"#,
        )
        .expect("parse failed");

        assert_eq!(request.limit, 25);
        assert_eq!(request.preferences.sweetness, 5);
        assert_eq!(request.preferences.budget, Some(2000));
    }
}
