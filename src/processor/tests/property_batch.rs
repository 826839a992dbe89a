//! Property split batch tests

use super::{RecordingSink, assert_close, number_at, text_at};
use crate::config::BifurcationConfig;
use crate::error::BifurcationError;
use crate::models::RowStyle;
use crate::processor::PropertyBatchProcessor;
use crate::table::column_names;
use polars::prelude::*;

fn caps(codes: &[&str], areas: &[f64]) -> DataFrame {
    df! {
        "PropertyCode" => codes.to_vec(),
        "Area_R" => areas.to_vec(),
    }
    .unwrap()
}

fn floors() -> DataFrame {
    df! {
        "PropertyCode" => ["P1", "P1", "P2", "P2"],
        "FloorID" => ["G", "1", "G", "1"],
        "BuiltupAreaSqFeet" => [400.0, 700.0, 300.0, 200.0],
        "CarpetAreaSqFeet" => [360.0, 630.0, 270.0, 180.0],
        "TypeOFUse" => ["R", "R", "R", "C"],
        "ConstructionYear" => [2001i64, 2001, 1995, 1995],
        "Owner" => ["A", "B", "C", "D"],
    }
    .unwrap()
}

#[test]
fn test_overflow_split_in_combined_table() {
    let output = PropertyBatchProcessor::default()
        .run(&caps(&["P1"], &[1000.0]), &floors(), &RecordingSink::default())
        .unwrap();
    let table = &output.table;

    assert_eq!(table.height(), 3);
    assert_eq!(text_at(table, "SplitRow", 0).as_deref(), Some("Balanced Part"));
    assert_eq!(text_at(table, "SplitRow", 1).as_deref(), Some("Balanced Part"));
    assert_eq!(text_at(table, "SplitRow", 2).as_deref(), Some("Overflow Split"));
    assert_eq!(text_at(table, "Status", 2).as_deref(), Some("Excess"));

    assert_close(number_at(table, "BuiltupAreaSqFeet", 1), 600.0);
    assert_close(number_at(table, "CarpetAreaSqFeet", 1), 540.0);
    assert_close(number_at(table, "BuiltupAreaSqFeet", 2), 100.0);
    assert_close(number_at(table, "CarpetAreaSqFeet", 2), 90.0);
    assert_close(number_at(table, "ConstructionYear", 1), 2001.0);
    assert_close(number_at(table, "ConstructionYear", 2), 2025.0);

    // other columns follow the source row of each part
    assert_eq!(text_at(table, "Owner", 0).as_deref(), Some("A"));
    assert_eq!(text_at(table, "Owner", 2).as_deref(), Some("B"));

    assert_eq!(
        output.row_styles,
        vec![RowStyle::Balanced, RowStyle::Balanced, RowStyle::Balanced]
    );
    assert_eq!(output.stats.overflow_splits, 1);
    assert_eq!(output.stats.rows_emitted, 3);
}

#[test]
fn test_properties_follow_caps_order() {
    let output = PropertyBatchProcessor::default()
        .run(
            &caps(&["P2", "P1"], &[5000.0, 5000.0]),
            &floors(),
            &RecordingSink::default(),
        )
        .unwrap();
    let table = &output.table;

    let owners: Vec<String> = (0..table.height())
        .map(|row| text_at(table, "Owner", row).unwrap())
        .collect();
    assert_eq!(owners, vec!["C", "D", "A", "B"]);

    assert_eq!(text_at(table, "SplitRow", 1).as_deref(), Some("Non-Residential"));
    assert_close(number_at(table, "ConstructionYear", 1), 2025.0);
    assert_close(number_at(table, "ConstructionYear", 0), 1995.0);
    assert_eq!(output.row_styles[1], RowStyle::Excess);
    assert_eq!(output.stats.properties_allocated, 2);
}

#[test]
fn test_floor_column_aliases_renamed() {
    let floors = df! {
        " propertycode" => ["P1"],
        "Floor" => ["G"],
        "BuiltUpArea" => [100.0],
        "CarpetArea" => [90.0],
        "TypeOfUse" => ["R"],
        "Year" => [2010i64],
    }
    .unwrap();
    let caps = df! {
        "Property Code" => ["P1"],
        "AreaR" => [500.0],
    }
    .unwrap();

    let output = PropertyBatchProcessor::default()
        .run(&caps, &floors, &RecordingSink::default())
        .unwrap();
    let names = column_names(&output.table);
    for canonical in [
        "PropertyCode",
        "FloorID",
        "BuiltupAreaSqFeet",
        "CarpetAreaSqFeet",
        "TypeOFUse",
        "ConstructionYear",
        "SplitRow",
        "Status",
    ] {
        assert!(names.contains(&canonical.to_string()), "missing {canonical}");
    }
    assert_eq!(output.table.height(), 1);
}

#[test]
fn test_missing_floor_column_aborts_before_processing() {
    let floors = floors().drop("CarpetAreaSqFeet").unwrap();
    let sink = RecordingSink::default();

    let err = PropertyBatchProcessor::default()
        .run(&caps(&["P1"], &[1000.0]), &floors, &sink)
        .unwrap_err();
    match err {
        BifurcationError::ColumnNotFound {
            required,
            available,
        } => {
            assert_eq!(required, vec!["CarpetAreaSqFeet", "CarpetArea"]);
            assert!(available.contains(&"Owner".to_string()));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(sink.messages().is_empty());
}

#[test]
fn test_missing_cap_column() {
    let caps = df! { "PropertyCode" => ["P1"], "Value" => [1.0] }.unwrap();
    let err = PropertyBatchProcessor::default()
        .run(&caps, &floors(), &RecordingSink::default())
        .unwrap_err();
    assert!(matches!(err, BifurcationError::ColumnNotFound { .. }));
}

#[test]
fn test_numeric_codes_match_across_tables() {
    let caps = df! {
        "PropertyCode" => [1001.0, 1002.0],
        "Area_R" => [150.0, 100.0],
    }
    .unwrap();
    let floors = df! {
        "PropertyCode" => [" 1001 ", "1002"],
        "FloorID" => ["G", "G"],
        "BuiltupAreaSqFeet" => ["100", "40.5"],
        "CarpetAreaSqFeet" => [Some(90.0), None],
        "TypeOFUse" => ["R", "R"],
        "ConstructionYear" => [Some(2001.0), None],
    }
    .unwrap();

    let output = PropertyBatchProcessor::default()
        .run(&caps, &floors, &RecordingSink::default())
        .unwrap();
    assert_eq!(output.table.height(), 2);
    assert_eq!(output.stats.properties_allocated, 2);
    assert_close(number_at(&output.table, "BuiltupAreaSqFeet", 1), 40.5);
    assert_close(number_at(&output.table, "CarpetAreaSqFeet", 1), 0.0);
    assert_eq!(text_at(&output.table, "ConstructionYear", 1), None);
}

#[test]
fn test_skipped_and_duplicate_properties() {
    let output = PropertyBatchProcessor::default()
        .run(
            &caps(&["P1", "P9", "P2", "P1"], &[0.0, 500.0, 1000.0, 2000.0]),
            &floors(),
            &RecordingSink::default(),
        )
        .unwrap();

    assert_eq!(output.stats.properties_seen, 3);
    assert_eq!(output.stats.properties_skipped, 2);
    assert_eq!(output.stats.properties_allocated, 1);
    assert_eq!(output.stats.duplicate_properties, 1);
    assert_eq!(output.table.height(), 2);
    assert_eq!(text_at(&output.table, "Owner", 0).as_deref(), Some("C"));
}

#[test]
fn test_no_allocations_gives_empty_table() {
    let output = PropertyBatchProcessor::default()
        .run(&caps(&["P5"], &[100.0]), &floors(), &RecordingSink::default())
        .unwrap();
    assert_eq!(output.table.height(), 0);
    assert!(output.row_styles.is_empty());
    assert!(column_names(&output.table).contains(&"SplitRow".to_string()));
}

#[test]
fn test_progress_every_interval_properties() {
    let config = BifurcationConfig::new().with_progress_intervals(2000, 2);
    let sink = RecordingSink::default();

    PropertyBatchProcessor::new(&config)
        .run(
            &caps(&["P1", "P2", "P3", "P4", "P5"], &[1.0; 5]),
            &floors(),
            &sink,
        )
        .unwrap();
    assert_eq!(
        sink.progress_messages(),
        vec!["Processed 2/5 properties...", "Processed 4/5 properties..."]
    );
}
