//! Column resolution by case- and space-insensitive name matching

use crate::error::{BifurcationError, Result};
use polars::prelude::DataFrame;

/// Lowercased name with surrounding and inner spaces removed
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "")
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// First column matching any candidate, trying candidates in order
pub fn find_column(df: &DataFrame, candidates: &[&str]) -> Option<String> {
    let available = column_names(df);
    candidates.iter().find_map(|candidate| {
        let key = normalize_column_name(candidate);
        available
            .iter()
            .find(|name| normalize_column_name(name) == key)
            .cloned()
    })
}

/// Like [`find_column`], failing with the candidates and available columns
pub fn detect_column(df: &DataFrame, candidates: &[&str]) -> Result<String> {
    find_column(df, candidates)
        .ok_or_else(|| BifurcationError::column_not_found(candidates, &column_names(df)))
}
