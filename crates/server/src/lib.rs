//! Service layer for the sake recommendation engine.
//!
//! This crate wraps the pure engine with request validation, tasting
//! history materialization from the catalog, and execution on the tokio
//! runtime.

pub mod service;

pub use service::{
    DEFAULT_LIMIT, HISTORY_WINDOW, MAX_LIMIT, RecommendRequest, RecommendResponse,
    RecommendationService, ServiceError,
};
