//! The recommendation entry point: filter, score, explain, rank.

use crate::context::{RequestContext, TastingHistoryEntry, TastingSummary};
use crate::error::EngineError;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyTastedFilter, BudgetFilter, CategoryFilter};
use crate::profile::PreferenceProfile;
use crate::rank::{ScoredCandidate, rank_candidates};
use crate::reason::generate_match_reason;
use crate::scoring::score_candidates;
use anyhow::Result;
use catalog::Sake;
use tracing::{debug, instrument};

/// Round to 2 decimal places for output
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate ranked recommendations for one request.
///
/// The whole call is pure and synchronous: filter the catalog against the
/// hard constraints, score the survivors in parallel, attach match reasons,
/// and rank. An empty catalog or an empty post-filter candidate set yields
/// an empty list, not an error.
///
/// # Errors
/// Returns `EngineError::InvalidLimit` when `limit` is zero. Coercing a
/// zero limit to something usable would hide caller bugs.
#[instrument(skip(profile, catalog, history), fields(catalog_size = catalog.len()))]
pub fn recommend(
    profile: &PreferenceProfile,
    catalog: &[Sake],
    history: &[TastingHistoryEntry],
    limit: usize,
) -> Result<Vec<ScoredCandidate>> {
    if limit == 0 {
        return Err(EngineError::InvalidLimit { limit }.into());
    }

    let context = RequestContext::new(profile.clone(), TastingSummary::from_entries(history));

    // Hard constraints first
    let pipeline = FilterPipeline::new()
        .add_filter(BudgetFilter)
        .add_filter(CategoryFilter)
        .add_filter(AlreadyTastedFilter);

    let candidates: Vec<&Sake> = catalog.iter().collect();
    let candidates = pipeline.apply(candidates, &context)?;
    debug!("{} candidates survived filtering", candidates.len());

    // Score the survivors in parallel, then attach reasons
    let scores = score_candidates(&candidates, &context);

    let scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .zip(scores)
        .map(|(sake, factors)| ScoredCandidate {
            sake_id: sake.sake_id.clone(),
            name: sake.name.clone(),
            brewery_id: sake.brewery_id.clone(),
            category: sake.category.clone(),
            price: sake.price,
            sweetness: sake.sweetness,
            acidity: sake.acidity,
            richness: sake.richness,
            score: round2(factors.composite()),
            factors,
            match_reason: generate_match_reason(sake, &context.profile),
        })
        .collect();

    Ok(rank_candidates(scored, limit))
}
