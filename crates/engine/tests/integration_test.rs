//! Integration tests for the recommendation engine.
//!
//! These tests drive the full filter -> score -> reason -> rank pipeline
//! through realistic requests and check the engine's contract end to end.

use engine::{ExperienceLevel, PreferenceProfile, TastingHistoryEntry, recommend};
use catalog::Sake;

fn sake(
    id: &str,
    brewery: &str,
    category: &str,
    price: u32,
    taste: (u8, u8, u8),
    rating: f32,
) -> Sake {
    Sake {
        sake_id: id.to_string(),
        name: format!("{} の酒", id),
        brewery_id: brewery.to_string(),
        category: category.to_string(),
        price,
        sweetness: taste.0,
        acidity: taste.1,
        richness: taste.2,
        rating,
        description: None,
        alcohol_content: None,
        rice_polishing_ratio: None,
        food_pairings: Vec::new(),
    }
}

fn entry(sake_id: &str, brewery_id: &str) -> TastingHistoryEntry {
    TastingHistoryEntry {
        sake_id: sake_id.to_string(),
        brewery_id: brewery_id.to_string(),
    }
}

fn create_test_catalog() -> Vec<Sake> {
    vec![
        sake("sake-001", "brewery-001", "junmai", 1400, (3, 3, 3), 5.0),
        sake("sake-002", "brewery-001", "junmai_daiginjo", 5280, (2, 3, 2), 4.5),
        sake("sake-003", "brewery-002", "honjozo", 980, (2, 2, 3), 3.5),
        sake("sake-004", "brewery-002", "daiginjo", 3800, (1, 3, 2), 4.2),
        sake("sake-005", "brewery-003", "futsushu", 750, (4, 2, 3), 3.0),
        sake("sake-006", "brewery-003", "koshu", 4200, (5, 3, 5), 3.8),
    ]
}

#[test]
fn test_perfect_match_scores_highest() {
    // Neutral profile, one candidate with identical taste values, empty
    // history, top rating: taste, diversity, and popularity all max out.
    let catalog = create_test_catalog();
    let profile = PreferenceProfile::default();

    let results = recommend(&profile, &catalog, &[], 10).unwrap();

    assert_eq!(results[0].sake_id, "sake-001");
    assert_eq!(results[0].factors.taste_match, 100.0);
    assert_eq!(results[0].factors.diversity, 100.0);
    assert_eq!(results[0].factors.popularity, 100.0);
    // Unspecified experience level takes the neutral 50 path
    assert_eq!(results[0].factors.experience_match, 50.0);
    // 100*0.6 + 50*0.2 + 100*0.1 + 100*0.1
    assert!((results[0].score - 90.0).abs() < 1e-9);
}

#[test]
fn test_beginner_perfect_match_reaches_full_score() {
    let catalog = create_test_catalog();
    let profile = PreferenceProfile {
        experience_level: Some(ExperienceLevel::Beginner),
        ..Default::default()
    };

    let results = recommend(&profile, &catalog, &[], 10).unwrap();

    // sake-001 is a beginner-friendly category with a perfect taste match
    assert_eq!(results[0].sake_id, "sake-001");
    assert_eq!(results[0].factors.experience_match, 100.0);
    assert!((results[0].score - 100.0).abs() < 1e-9);
}

#[test]
fn test_budget_excludes_expensive_candidates() {
    // A tight budget excludes the premium bottles outright, regardless of
    // how well they match the taste profile.
    let catalog = create_test_catalog();
    let profile = PreferenceProfile {
        sweetness: 2,
        richness: 2,
        budget: Some(1000),
        ..Default::default()
    };

    let results = recommend(&profile, &catalog, &[], 10).unwrap();

    assert!(!results.is_empty());
    for rec in &results {
        assert!(rec.price <= 1000, "{} is over budget", rec.sake_id);
    }
    assert!(!results.iter().any(|r| r.sake_id == "sake-002"));
}

#[test]
fn test_tasted_sake_never_reappears() {
    let catalog = create_test_catalog();
    let history = vec![
        entry("sake-001", "brewery-001"),
        entry("sake-003", "brewery-002"),
    ];

    let results = recommend(&PreferenceProfile::default(), &catalog, &history, 10).unwrap();

    assert!(!results.iter().any(|r| r.sake_id == "sake-001"));
    assert!(!results.iter().any(|r| r.sake_id == "sake-003"));
    assert_eq!(results.len(), 4);
}

#[test]
fn test_history_covering_all_candidates_yields_empty_output() {
    let catalog = vec![sake("sake-001", "brewery-001", "junmai", 1400, (3, 3, 3), 5.0)];
    let history = vec![entry("sake-001", "brewery-001")];

    let results = recommend(&PreferenceProfile::default(), &catalog, &history, 10).unwrap();

    assert!(results.is_empty());
}

#[test]
fn test_limit_caps_output_to_highest_scoring() {
    // Ten eligible candidates with strictly increasing ratings, so the
    // composite ordering is unambiguous.
    let catalog: Vec<Sake> = (1..=10)
        .map(|i| {
            sake(
                &format!("sake-{:03}", i),
                &format!("brewery-{:03}", i),
                "junmai",
                1000,
                (3, 3, 3),
                i as f32 * 0.5,
            )
        })
        .collect();

    let top3 = recommend(&PreferenceProfile::default(), &catalog, &[], 3).unwrap();
    let all = recommend(&PreferenceProfile::default(), &catalog, &[], 10).unwrap();

    assert_eq!(top3.len(), 3);
    assert_eq!(all.len(), 10);
    // The 3 returned are exactly the 3 highest-scoring overall
    for (a, b) in top3.iter().zip(all.iter().take(3)) {
        assert_eq!(a.sake_id, b.sake_id);
        assert_eq!(a.score, b.score);
    }
    assert_eq!(top3[0].sake_id, "sake-010");
}

#[test]
fn test_output_length_is_min_of_limit_and_eligible() {
    let catalog = create_test_catalog();
    let profile = PreferenceProfile::default();

    assert_eq!(recommend(&profile, &catalog, &[], 4).unwrap().len(), 4);
    assert_eq!(recommend(&profile, &catalog, &[], 100).unwrap().len(), 6);
}

#[test]
fn test_scores_stay_in_range() {
    let catalog = create_test_catalog();

    for sweetness in [1, 3, 5] {
        for level in [
            None,
            Some(ExperienceLevel::Beginner),
            Some(ExperienceLevel::Intermediate),
            Some(ExperienceLevel::Advanced),
        ] {
            let profile = PreferenceProfile {
                sweetness,
                experience_level: level,
                ..Default::default()
            };
            let results = recommend(&profile, &catalog, &[], 10).unwrap();

            for rec in &results {
                assert!(
                    rec.score >= 0.0 && rec.score <= 100.0,
                    "score {} out of range for {}",
                    rec.score,
                    rec.sake_id
                );
            }
        }
    }
}

#[test]
fn test_output_is_sorted_non_increasing() {
    let catalog = create_test_catalog();
    let results = recommend(&PreferenceProfile::default(), &catalog, &[], 10).unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_identical_inputs_identical_output() {
    // With the deterministic tie-break, idempotence covers order too.
    let catalog = create_test_catalog();
    let profile = PreferenceProfile {
        sweetness: 2,
        experience_level: Some(ExperienceLevel::Advanced),
        ..Default::default()
    };
    let history = vec![entry("sake-005", "brewery-003")];

    let first = recommend(&profile, &catalog, &history, 10).unwrap();
    let second = recommend(&profile, &catalog, &history, 10).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.sake_id, b.sake_id);
        assert_eq!(a.score, b.score);
        assert_eq!(a.match_reason, b.match_reason);
    }
}

#[test]
fn test_full_pipeline_realistic() {
    // Combined constraints, as a real request would carry them.
    let catalog = create_test_catalog();
    let profile = PreferenceProfile {
        sweetness: 2,
        acidity: 3,
        richness: 2,
        budget: Some(4000),
        categories: ["junmai", "honjozo", "daiginjo"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        experience_level: Some(ExperienceLevel::Intermediate),
    };
    let history = vec![entry("sake-003", "brewery-002")];

    let results = recommend(&profile, &catalog, &history, 10).unwrap();

    assert!(!results.is_empty());
    for rec in &results {
        assert!(rec.price <= 4000);
        assert!(["junmai", "honjozo", "daiginjo"].contains(&rec.category.as_str()));
        assert_ne!(rec.sake_id, "sake-003");
        assert!(!rec.match_reason.is_empty());
        assert_eq!(rec.factors.experience_match, 80.0);
    }
}
