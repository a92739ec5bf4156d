//! Error types for the recommendation engine.
//!
//! The engine is designed to never fail on malformed-but-well-typed input:
//! missing optional fields take neutral defaults at deserialization time.
//! Only structural caller bugs surface as errors.

use thiserror::Error;

/// Errors the engine reports to callers
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested result count was not a positive integer
    #[error("Recommendation limit must be positive, got {limit}")]
    InvalidLimit { limit: usize },

    /// A preference value could not be interpreted
    #[error("Invalid preference value: {0}")]
    Validation(String),
}
