//! Factor scoring for candidate sake.
//!
//! Four independent factor scorers each produce a value in [0, 100]; the
//! composite combines them with fixed weights. Everything here is a pure
//! function over the candidate and the request context, so candidates can
//! be scored in any order or in parallel.

use crate::context::{RequestContext, TastingSummary};
use crate::profile::{ExperienceLevel, PreferenceProfile};
use catalog::Sake;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Categories that suit drinkers new to sake
pub const BEGINNER_FRIENDLY_CATEGORIES: &[&str] = &["junmai", "honjozo", "futsushu"];

/// Categories aimed at experienced drinkers
pub const ADVANCED_CATEGORIES: &[&str] = &["daiginjo", "junmai_daiginjo", "koshu"];

// Composite weights, must sum to 1.0
const TASTE_WEIGHT: f64 = 0.6;
const EXPERIENCE_WEIGHT: f64 = 0.2;
const DIVERSITY_WEIGHT: f64 = 0.1;
const POPULARITY_WEIGHT: f64 = 0.1;

/// The four factor scores computed for one candidate.
///
/// Kept alongside the composite in the output so callers can explain
/// where a score came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorScores {
    pub taste_match: f64,
    pub experience_match: f64,
    pub diversity: f64,
    pub popularity: f64,
}

impl FactorScores {
    /// Weighted composite of the four factors, capped at 100.
    ///
    /// Taste fit dominates the ranking, experience-appropriateness is
    /// secondary, diversity and popularity are light nudges. The weights
    /// sum to 1.0, so the cap only guards against a scorer returning an
    /// out-of-range value.
    pub fn composite(&self) -> f64 {
        let score = self.taste_match * TASTE_WEIGHT
            + self.experience_match * EXPERIENCE_WEIGHT
            + self.diversity * DIVERSITY_WEIGHT
            + self.popularity * POPULARITY_WEIGHT;
        score.min(100.0)
    }
}

/// Taste profile match score.
///
/// ## Algorithm
/// Average the absolute per-dimension distance between profile and
/// candidate on the 1-5 scales (max distance per dimension is 4), then
/// map to 0-100: a perfect match scores 100, maximum divergence scores 0.
pub fn taste_match_score(sake: &Sake, profile: &PreferenceProfile) -> f64 {
    let sweetness_diff = profile.sweetness.abs_diff(sake.sweetness) as f64;
    let acidity_diff = profile.acidity.abs_diff(sake.acidity) as f64;
    let richness_diff = profile.richness.abs_diff(sake.richness) as f64;

    let avg_diff = (sweetness_diff + acidity_diff + richness_diff) / 3.0;

    (100.0 - avg_diff * 25.0).max(0.0)
}

/// Experience level match score.
///
/// ## Algorithm
/// - Beginner: 100 for beginner-friendly categories, else 50
/// - Intermediate: flat 80 (intermediate drinkers can try anything)
/// - Advanced: 100 for advanced categories, else 70
/// - Unspecified: neutral 50
pub fn experience_match_score(sake: &Sake, profile: &PreferenceProfile) -> f64 {
    let category = sake.category.as_str();
    match profile.experience_level {
        Some(ExperienceLevel::Beginner) => {
            if BEGINNER_FRIENDLY_CATEGORIES.contains(&category) {
                100.0
            } else {
                50.0
            }
        }
        Some(ExperienceLevel::Intermediate) => 80.0,
        Some(ExperienceLevel::Advanced) => {
            if ADVANCED_CATEGORIES.contains(&category) {
                100.0
            } else {
                70.0
            }
        }
        None => 50.0,
    }
}

/// Diversity bonus score.
///
/// Rewards sake from breweries the user hasn't tried yet.
pub fn diversity_score(sake: &Sake, history: &TastingSummary) -> f64 {
    if history.is_empty() {
        return 100.0; // Maximum diversity for new users
    }
    if !history.tasted_breweries.contains(&sake.brewery_id) {
        100.0
    } else {
        50.0
    }
}

/// Popularity score: master-data rating mapped linearly from 0-5 to 0-100.
pub fn popularity_score(sake: &Sake) -> f64 {
    f64::from(sake.rating) * 20.0
}

/// Compute all four factor scores for a single candidate.
pub fn score_candidate(sake: &Sake, context: &RequestContext) -> FactorScores {
    FactorScores {
        taste_match: taste_match_score(sake, &context.profile),
        experience_match: experience_match_score(sake, &context.profile),
        diversity: diversity_score(sake, &context.history),
        popularity: popularity_score(sake),
    }
}

/// Score all candidates in parallel.
///
/// Candidates are independent, so this is a plain rayon map.
///
/// # Returns
/// Vec of FactorScores, one per candidate, in the same order
pub fn score_candidates(candidates: &[&Sake], context: &RequestContext) -> Vec<FactorScores> {
    candidates
        .par_iter()
        .map(|sake| score_candidate(sake, context))
        .collect()
}
