//! Tests for floor ordering and cap allocation

pub mod ordering_tests;

use crate::models::FloorRecord;

pub const TOLERANCE: f64 = 1e-6;

/// Floor of property "P1" built in 2001
pub fn floor(
    source_row: usize,
    floor_id: &str,
    builtup: f64,
    carpet: f64,
    type_of_use: &str,
) -> FloorRecord {
    FloorRecord {
        source_row,
        property_code: "P1".to_string(),
        floor_id: Some(floor_id.to_string()),
        builtup_area_sq_feet: builtup,
        carpet_area_sq_feet: carpet,
        type_of_use: type_of_use.to_string(),
        construction_year: Some(2001),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
