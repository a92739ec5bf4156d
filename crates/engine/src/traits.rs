//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::context::RequestContext;
use anyhow::Result;
use catalog::Sake;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Candidates are references into the caller's catalog slice; filters take
///   ownership of the Vec of references and return a filtered Vec
/// - This allows arbitrary filtering without cloning a single Sake
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership of the Vec)
    /// * `context` - Request context containing preferences and history
    ///
    /// # Returns
    /// * `Ok(Vec<&Sake>)` - The filtered candidates
    /// * `Err` - If filtering fails
    fn apply<'a>(
        &self,
        candidates: Vec<&'a Sake>,
        context: &RequestContext,
    ) -> Result<Vec<&'a Sake>>;
}
