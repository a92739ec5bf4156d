//! Filter to keep only sake in the user's allowed categories.
//!
//! Users can restrict recommendations to category tags they care about
//! (junmai only, say). An empty set means no restriction.

use crate::context::RequestContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Sake;

/// Keeps only candidates whose category is in the profile's allowed set.
///
/// ## Algorithm
/// If the profile's category set is empty, all candidates pass. Otherwise
/// keep only candidates whose category tag is in the set.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Sake>,
        context: &RequestContext,
    ) -> Result<Vec<&'a Sake>> {
        let allowed = &context.profile.categories;
        if allowed.is_empty() {
            return Ok(candidates);
        }
        let filtered: Vec<&Sake> = candidates
            .into_iter()
            .filter(|sake| allowed.contains(&sake.category))
            .collect();
        Ok(filtered)
    }
}
