//! Parser for the sake master data files.
//!
//! This module handles parsing the JSON master files:
//! - sake_master.json: array of sake records
//! - brewery_master.json: array of brewery records
//! - tasting_records.json: array of tasting records, most recent first per user
//!
//! Field-level decoding (defaults, optional fields) lives on the types
//! themselves via serde attributes; this module is about file handling and
//! error reporting.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Helper function to read a data file into a string
///
/// Checks for existence first so a missing file reports as `FileNotFound`
/// with its path instead of a bare io error.
fn read_json_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn parse_sake_str(content: &str, file: &str) -> Result<Vec<Sake>> {
    serde_json::from_str(content).map_err(|e| CatalogError::JsonError {
        file: file.to_string(),
        source: e,
    })
}

fn parse_breweries_str(content: &str, file: &str) -> Result<Vec<Brewery>> {
    serde_json::from_str(content).map_err(|e| CatalogError::JsonError {
        file: file.to_string(),
        source: e,
    })
}

fn parse_tastings_str(content: &str, file: &str) -> Result<Vec<TastingRecord>> {
    serde_json::from_str(content).map_err(|e| CatalogError::JsonError {
        file: file.to_string(),
        source: e,
    })
}

/// Parse the sake_master.json file
pub fn parse_sake_file(path: &Path) -> Result<Vec<Sake>> {
    let content = read_json_file(path)?;
    parse_sake_str(&content, &path.display().to_string())
}

/// Parse the brewery_master.json file
pub fn parse_breweries_file(path: &Path) -> Result<Vec<Brewery>> {
    let content = read_json_file(path)?;
    parse_breweries_str(&content, &path.display().to_string())
}

/// Parse the tasting_records.json file
pub fn parse_tastings_file(path: &Path) -> Result<Vec<TastingRecord>> {
    let content = read_json_file(path)?;
    parse_tastings_str(&content, &path.display().to_string())
}
