//! Canonical floor ordering.
//!
//! Basements first, then ground, numbered floors, terrace, and finally any
//! floor id that cannot be interpreted.

use crate::constants::{BASEMENT_ORDER, GROUND_ORDER, TERRACE_ORDER};

/// Sort key for a floor id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloorRank {
    Level(i64),
    /// Absent or unrecognized ids, sorted after every level
    Unranked,
}

pub fn logical_floor_order(floor_id: Option<&str>) -> FloorRank {
    let Some(floor_id) = floor_id else {
        return FloorRank::Unranked;
    };
    let floor = floor_id.trim().to_uppercase();

    if floor == "G" {
        return FloorRank::Level(GROUND_ORDER);
    }
    if let Ok(level) = floor.parse::<i64>() {
        return FloorRank::Level(level);
    }
    if floor.contains("BASE") {
        FloorRank::Level(BASEMENT_ORDER)
    } else if floor == "T" || floor.contains("TERRACE") {
        FloorRank::Level(TERRACE_ORDER)
    } else {
        FloorRank::Unranked
    }
}
