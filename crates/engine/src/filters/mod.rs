//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_tasted;
pub mod budget;
pub mod category;

// Re-export for convenience
pub use already_tasted::AlreadyTastedFilter;
pub use budget::BudgetFilter;
pub use category::CategoryFilter;
