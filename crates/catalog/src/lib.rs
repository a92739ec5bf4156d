//! # Catalog Crate
//!
//! This crate handles loading and indexing the sake master data.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Sake, Brewery, TastingRecord, CatalogIndex)
//! - **parser**: Parse the JSON master files into Rust structs
//! - **index**: Build efficient indices for fast lookups
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! // Load the entire catalog
//! let index = CatalogIndex::load_from_files(Path::new("data"))?;
//!
//! // Query data
//! let sake = index.get_sake("sake-001").unwrap();
//! let brewery = index.get_brewery(&sake.brewery_id).unwrap();
//! let tastings = index.get_tastings("user-001");
//!
//! println!("{} by {}: {} tastings on record", sake.name, brewery.name, tastings.len());
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    SakeId,
    BreweryId,
    UserId,
    // Core types
    Sake,
    Brewery,
    TastingRecord,
    CatalogIndex,
    BreweryStats,
};
