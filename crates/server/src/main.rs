//! Simple test harness for the recommendation service.
//!
//! This binary lets you exercise the end-to-end pipeline by requesting
//! recommendations for a sample user against the bundled catalog.

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use catalog::CatalogIndex;
use engine::{ExperienceLevel, PreferenceProfile};
use server::{RecommendRequest, RecommendationService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,engine=debug")
        .init();

    info!("Starting SakeRecs service harness");

    // First argument overrides the catalog directory
    let data_dir = env::args().nth(1).unwrap_or_else(|| "data".to_string());
    info!("Loading catalog from {}...", data_dir);
    let index = CatalogIndex::load_from_files(Path::new(&data_dir))?;
    let (sake_count, brewery_count, tasting_count) = index.counts();
    info!(
        "Catalog loaded: {} sake, {} breweries, {} tasting records",
        sake_count, brewery_count, tasting_count
    );

    let service = RecommendationService::new(Arc::new(index));

    // A dry-leaning intermediate drinker with a mid-range budget
    let request = RecommendRequest {
        user_id: "user-001".to_string(),
        preferences: PreferenceProfile {
            sweetness: 2,
            richness: 2,
            budget: Some(4000),
            experience_level: Some(ExperienceLevel::Intermediate),
            ..Default::default()
        },
        limit: 5,
    };

    info!(
        "Requesting recommendations for user {} (limit: {})",
        request.user_id, request.limit
    );
    let response = service.recommend(request).await?;

    info!("Received {} recommendations:", response.count);
    for (i, rec) in response.recommendations.iter().enumerate() {
        info!(
            "{}. {} [{}] - Score: {:.2} (¥{})",
            i + 1,
            rec.name,
            rec.category,
            rec.score,
            rec.price
        );
        info!("   {}", rec.match_reason);
    }

    Ok(())
}
