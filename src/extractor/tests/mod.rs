//! Tests for the area extractor
//!
//! Covers description cleaning, contextual token categorization and direct
//! label classification.

pub mod direct_tests;

use crate::extractor::AreaExtractor;
use crate::models::{AreaRecord, AreaResult, UnmatchedTypes};

pub const TOLERANCE: f64 = 1e-6;

/// Run the default extractor on a single record
pub fn extract_one(
    description: &str,
    declared: Option<f64>,
    construction_type: &str,
) -> (AreaResult, UnmatchedTypes) {
    let extractor = AreaExtractor::default();
    let mut unmatched = UnmatchedTypes::new();
    let record = AreaRecord::new(description, declared, construction_type);
    let result = extractor.extract(&record, &mut unmatched);
    (result, unmatched)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Categories are non-negative and sum to the total
pub fn assert_balanced(result: &AreaResult) {
    for value in [
        result.rcc,
        result.parking,
        result.construction,
        result.temporary_shed,
        result.open,
    ] {
        assert!(value >= 0.0, "negative category in {result:?}");
    }
    assert_close(result.category_sum(), result.total_area);
}
