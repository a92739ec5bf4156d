//! Recommendation engine: filtering, scoring, and ranking of sake candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for hard-constraint filtering
//! - FilterPipeline for composing filters
//! - Factor scorers and the weighted composite score
//! - Match reason generation and final ranking
//!
//! ## Architecture
//! A request flows through the stages in order:
//! 1. Filters remove ineligible candidates (over budget, wrong category, already tasted)
//! 2. Factor scorers run per candidate (taste, experience, diversity, popularity)
//! 3. The composite scorer folds the factors into one 0-100 score
//! 4. The reason generator attaches a human-readable explanation
//! 5. The ranker sorts by score and truncates to the requested count
//!
//! The whole pipeline is pure: no I/O, no state carried between calls.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{recommend, PreferenceProfile};
//!
//! let profile = PreferenceProfile {
//!     sweetness: 2,
//!     budget: Some(3000),
//!     ..Default::default()
//! };
//!
//! let recommendations = recommend(&profile, &catalog, &history, 10)?;
//! for rec in &recommendations {
//!     println!("{} ({:.2}): {}", rec.name, rec.score, rec.match_reason);
//! }
//! ```

pub mod context;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod profile;
pub mod rank;
pub mod reason;
pub mod recommend;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use context::{RequestContext, TastingHistoryEntry, TastingSummary};
pub use error::EngineError;
pub use filter_pipeline::FilterPipeline;
pub use profile::{ExperienceLevel, PreferenceProfile};
pub use rank::{ScoredCandidate, rank_candidates};
pub use reason::generate_match_reason;
pub use recommend::recommend;
pub use scoring::{FactorScores, score_candidate, score_candidates};
pub use traits::Filter;
