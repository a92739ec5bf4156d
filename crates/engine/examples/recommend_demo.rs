//! Example: Generate recommendations for a user
//!
//! Run with: cargo run --package engine --example recommend_demo
//!
//! This example shows how to:
//! 1. Load the sake catalog
//! 2. Materialize a user's tasting history
//! 3. Build a preference profile
//! 4. Run the recommendation pipeline
//! 5. Display the results

use catalog::CatalogIndex;
use engine::{ExperienceLevel, PreferenceProfile, TastingHistoryEntry, recommend};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== SakeRecs Recommendation Example ===\n");

    // Load catalog
    println!("Loading sake catalog...");
    let start = Instant::now();
    let data_dir = Path::new("data");
    let index = CatalogIndex::load_from_files(data_dir)?;
    println!("Loaded catalog in {:?}\n", start.elapsed());

    // Choose a test user
    let user_id = "user-001";
    let records = index.get_tastings(user_id);
    println!("Target user: {}", user_id);
    println!("  Tasting records: {}\n", records.len());

    // Materialize history (join tasting records against the catalog)
    let history: Vec<TastingHistoryEntry> = records
        .iter()
        .filter_map(|record| {
            let sake = index.get_sake(&record.sake_id)?;
            Some(TastingHistoryEntry {
                sake_id: record.sake_id.clone(),
                brewery_id: sake.brewery_id.clone(),
            })
        })
        .collect();

    // Snapshot the catalog into a slice for the engine
    let catalog: Vec<_> = index.all_sake().cloned().collect();

    // A beginner who likes it dry, on a budget
    let profile = PreferenceProfile {
        sweetness: 2,
        budget: Some(3500),
        experience_level: Some(ExperienceLevel::Beginner),
        ..Default::default()
    };

    println!("Generating recommendations (beginner, dry, budget 3500 yen)...");
    let start = Instant::now();
    let results = recommend(&profile, &catalog, &history, 5)?;
    let elapsed = start.elapsed();
    println!("Generated {} recommendations in {:?}\n", results.len(), elapsed);

    for (i, rec) in results.iter().enumerate() {
        let brewery_name = index
            .get_brewery(&rec.brewery_id)
            .map(|b| b.name.as_str())
            .unwrap_or("不明");
        println!(
            "  {}. {} ({}) - {:.2}点",
            i + 1,
            rec.name,
            brewery_name,
            rec.score
        );
        println!("     {} / ¥{} / {}", rec.category, rec.price, rec.match_reason);
    }

    // Same user, but exploring the premium end
    let premium_profile = PreferenceProfile {
        sweetness: 2,
        experience_level: Some(ExperienceLevel::Advanced),
        ..Default::default()
    };

    println!("\nGenerating recommendations (advanced, no budget)...");
    let start = Instant::now();
    let premium = recommend(&premium_profile, &catalog, &history, 5)?;
    let premium_elapsed = start.elapsed();
    println!(
        "Generated {} recommendations in {:?}\n",
        premium.len(),
        premium_elapsed
    );

    for (i, rec) in premium.iter().enumerate() {
        println!(
            "  {}. {} - {:.2}点 ({})",
            i + 1,
            rec.name,
            rec.score,
            rec.match_reason
        );
    }

    // Summary
    println!("\n=== Summary ===");
    println!("Catalog size: {}", catalog.len());
    println!("History entries: {}", history.len());
    println!(
        "Engine time: {:?} (target: <5ms) {}",
        elapsed,
        if elapsed.as_millis() < 5 { "✓" } else { "✗" }
    );

    Ok(())
}
