//! Final ranking of scored candidates.

use crate::scoring::FactorScores;
use catalog::{BreweryId, SakeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One fully scored recommendation, ready to return to the caller.
///
/// Carries the candidate's master-data attributes, the rounded composite
/// score, the unrounded factor breakdown, and the match reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub sake_id: SakeId,
    pub name: String,
    pub brewery_id: BreweryId,
    pub category: String,
    pub price: u32,
    pub sweetness: u8,
    pub acidity: u8,
    pub richness: u8,
    /// Composite score, 0-100, rounded to 2 decimals
    pub score: f64,
    /// Per-factor breakdown behind the composite
    pub factors: FactorScores,
    pub match_reason: String,
}

/// Sort candidates by score descending and keep the top `limit`.
///
/// Ties are broken by sake_id ascending, so identical inputs always
/// produce identical output order.
pub fn rank_candidates(
    mut candidates: Vec<ScoredCandidate>,
    limit: usize,
) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.sake_id.cmp(&b.sake_id))
    });
    candidates.truncate(limit);
    candidates
}
