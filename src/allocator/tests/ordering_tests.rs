use crate::allocator::floor_order::{FloorRank, logical_floor_order};

#[test]
fn test_named_floors() {
    assert_eq!(logical_floor_order(Some("G")), FloorRank::Level(0));
    assert_eq!(logical_floor_order(Some(" g ")), FloorRank::Level(0));
    assert_eq!(logical_floor_order(Some("T")), FloorRank::Level(100));
    assert_eq!(logical_floor_order(Some("Terrace")), FloorRank::Level(100));
    assert_eq!(logical_floor_order(Some("basement1")), FloorRank::Level(-1));
    assert_eq!(logical_floor_order(Some("BASE")), FloorRank::Level(-1));
}

#[test]
fn test_numeric_floors() {
    assert_eq!(logical_floor_order(Some("3")), FloorRank::Level(3));
    assert_eq!(logical_floor_order(Some("-2")), FloorRank::Level(-2));
    assert_eq!(logical_floor_order(Some("101")), FloorRank::Level(101));
}

#[test]
fn test_unknown_and_missing_sort_last() {
    assert_eq!(logical_floor_order(None), FloorRank::Unranked);
    assert_eq!(logical_floor_order(Some("")), FloorRank::Unranked);
    assert_eq!(logical_floor_order(Some("Mezzanine")), FloorRank::Unranked);
    assert!(FloorRank::Level(i64::MAX) < FloorRank::Unranked);
}

#[test]
fn test_sort_order() {
    let mut floors = vec!["XYZ", "TERRACE", "2", "G", "BASEMENT1", "1"];
    floors.sort_by_key(|f| logical_floor_order(Some(*f)));
    assert_eq!(floors, vec!["BASEMENT1", "G", "1", "2", "TERRACE", "XYZ"]);
}

#[test]
fn test_sort_is_stable_for_equal_ranks() {
    let mut floors = vec![("T", 1), ("Terrace", 2), ("t", 3)];
    floors.sort_by_key(|(f, _)| logical_floor_order(Some(*f)));
    let order: Vec<i32> = floors.iter().map(|(_, i)| *i).collect();
    assert_eq!(order, vec![1, 2, 3]);
}
