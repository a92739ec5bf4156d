//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::context::RequestContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Sake;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(BudgetFilter)
///     .add_filter(CategoryFilter)
///     .add_filter(AlreadyTastedFilter);
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter
    /// * `context` - Request context for filtering decisions
    ///
    /// # Returns
    /// * `Ok(Vec<&Sake>)` - The filtered candidates after all filters
    /// * `Err` - If any filter fails
    pub fn apply<'a>(
        &self,
        candidates: Vec<&'a Sake>,
        context: &RequestContext,
    ) -> Result<Vec<&'a Sake>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
