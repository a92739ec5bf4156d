//! Filter to remove sake the user has already tasted.
//!
//! This is typically the last hard filter in the pipeline, as there's no
//! point in recommending sake the user has already tried.

use crate::context::RequestContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Sake;

/// Removes candidates that appear in the user's tasting history.
///
/// ## Algorithm
/// Uses the HashSet in TastingSummary.tasted_sake for O(1) lookups.
pub struct AlreadyTastedFilter;

impl Filter for AlreadyTastedFilter {
    fn name(&self) -> &str {
        "AlreadyTastedFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Sake>,
        context: &RequestContext,
    ) -> Result<Vec<&'a Sake>> {
        let filtered: Vec<&Sake> = candidates
            .into_iter()
            .filter(|sake| !context.history.tasted_sake.contains(&sake.sake_id))
            .collect();
        Ok(filtered)
    }
}
