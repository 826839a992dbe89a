//! Direct mode tests: whole-record classification by construction type

use super::{assert_balanced, assert_close, extract_one};
use crate::extractor::AreaExtractor;
use crate::extractor::classification::{
    CLASSIFICATION_RULES, KeyPredicate, classify_key, normalize_label,
};
use crate::models::{AreaCategory, AreaRecord, ExtractionMode, UnmatchedTypes};

#[test]
fn test_normalize_label_strips_separators() {
    assert_eq!(normalize_label(" आर सी सी\u{200b}-RCC. "), "आरसीसीrcc");
    assert_eq!(normalize_label("पार्किंग\u{00a0}एरीया"), "पार्किंगएरीया");
    assert_eq!(normalize_label(""), "");
}

#[test]
fn test_rule_table_order() {
    let categories: Vec<AreaCategory> = CLASSIFICATION_RULES.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            AreaCategory::Rcc,
            AreaCategory::Construction,
            AreaCategory::TemporaryShed,
            AreaCategory::Parking,
            AreaCategory::Open,
        ]
    );
}

#[test]
fn test_first_matching_rule_wins() {
    assert_eq!(classify_key("पार्किंगएरीयाrcc"), Some(AreaCategory::Rcc));
    assert_eq!(classify_key("पार्किंगएरीया"), Some(AreaCategory::Parking));
    assert_eq!(classify_key("unknown"), None);
}

#[test]
fn test_predicate_contains_any() {
    let predicate = KeyPredicate::ContainsAny(&["ab", "cd"]);
    assert!(predicate.matches("xxcdxx"));
    assert!(!predicate.matches("acbd"));
}

#[test]
fn test_labels_map_to_categories() {
    let cases = [
        ("आर.सी.सी. किंवा लोड बेअरिंग", AreaCategory::Rcc),
        ("RCC", AreaCategory::Rcc),
        ("साधे शेड किंवाँ ऑफीस", AreaCategory::Construction),
        ("पत्र्याची टेम्पररी शेड्स", AreaCategory::TemporaryShed),
        ("पार्किंग एरीया", AreaCategory::Parking),
        ("मोकळ्या जमिन", AreaCategory::Open),
    ];
    for (label, category) in cases {
        let (result, unmatched) = extract_one("घर", Some(750.0), label);
        assert_eq!(result.mode, ExtractionMode::Direct, "label {label:?}");
        assert_close(result.get(category), 750.0);
        assert_close(result.total_area, 750.0);
        assert!(unmatched.is_empty(), "label {label:?} unmatched");
        assert_balanced(&result);
    }
}

#[test]
fn test_unmatched_label_defaults_to_rcc_once() {
    let extractor = AreaExtractor::default();
    let mut unmatched = UnmatchedTypes::new();
    let record = AreaRecord::new("घर", Some(500.0), "Unknown Type");

    for _ in 0..3 {
        let result = extractor.extract(&record, &mut unmatched);
        assert_close(result.rcc, 500.0);
    }

    assert_eq!(unmatched.reportable(), vec!["Unknown Type".to_string()]);
}

#[test]
fn test_dimension_total_used_without_declared() {
    let (result, _) = extract_one("खोली 10x12 व 5X4", None, "RCC");
    assert_close(result.total_area, 140.0);
    assert_close(result.rcc, 140.0);
    assert_eq!(result.raw_area_text.as_deref(), Some("10*12, 5*4"));
}

#[test]
fn test_declared_total_wins_over_dimensions() {
    let (result, _) = extract_one("खोली 10x12", Some(300.0), "RCC");
    assert_close(result.total_area, 300.0);
    assert_close(result.rcc, 300.0);
}

#[test]
fn test_raw_text_uses_uncleaned_description() {
    let (result, _) = extract_one("क्षेत्र = 500 चौ फु", None, "RCC");
    assert_close(result.total_area, 0.0);
    assert_eq!(result.raw_area_text.as_deref(), Some("500 चौ फु"));
}

#[test]
fn test_no_tokens_gives_no_raw_text() {
    let (result, _) = extract_one("घर", Some(90.0), "RCC");
    assert!(result.raw_area_text.is_none());
    assert_close(result.rcc, 90.0);
}

#[test]
fn test_absent_declared_and_no_dimensions() {
    let (result, unmatched) = extract_one("", None, "");
    assert_close(result.total_area, 0.0);
    assert_balanced(&result);
    // blank labels are tracked but never reported
    assert!(unmatched.contains(""));
    assert!(unmatched.reportable().is_empty());
}
