//! Filter to enforce the user's budget ceiling.
//!
//! Recommending sake the user has said they won't pay for wastes a slot,
//! so anything over budget is dropped before scoring.

use crate::context::RequestContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Sake;

/// Removes candidates priced above the profile's budget.
///
/// ## Algorithm
/// If no budget is set, all candidates pass. Otherwise keep only
/// candidates with price <= budget.
pub struct BudgetFilter;

impl Filter for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Sake>,
        context: &RequestContext,
    ) -> Result<Vec<&'a Sake>> {
        if context.profile.budget.is_none() {
            return Ok(candidates);
        }
        let budget = context.profile.budget.unwrap();
        let filtered: Vec<&Sake> = candidates
            .into_iter()
            .filter(|sake| sake.price <= budget)
            .collect();
        Ok(filtered)
    }
}
