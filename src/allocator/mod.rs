//! Proportional floor-area allocation against a property area cap.
//!
//! Residential floors are walked bottom-up in canonical floor order and
//! accumulated against the cap. The floor that crosses the cap is split into
//! a balanced part and an overflow part, carpet area scaled with built-up
//! area; every later residential floor and every non-residential floor is
//! marked excess. At most one floor per property is split.

pub mod floor_order;

#[cfg(test)]
pub mod tests;

use self::floor_order::logical_floor_order;

use crate::config::AllocationConfig;
use crate::models::{AllocationStatus, FloorRecord, SplitFloorRecord, SplitRow};
use tracing::debug;

/// Allocates one property's floors against its cap
#[derive(Debug, Clone, Default)]
pub struct FloorAllocator {
    config: AllocationConfig,
}

impl FloorAllocator {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// Allocate `floors` of a single property against `area_cap`.
    ///
    /// Returns no rows when the cap is not positive or there are no floors.
    pub fn allocate(&self, area_cap: f64, floors: &[FloorRecord]) -> Vec<SplitFloorRecord> {
        if floors.is_empty() || area_cap.is_nan() || area_cap <= 0.0 {
            return Vec::new();
        }

        let (valid, other): (Vec<&FloorRecord>, Vec<&FloorRecord>) = floors
            .iter()
            .partition(|floor| self.config.is_residential(floor.type_of_use.trim()));

        let valid_builtup: f64 = valid.iter().map(|floor| floor.builtup_area_sq_feet).sum();
        if valid_builtup <= area_cap {
            return floors.iter().map(|floor| self.within_cap(floor)).collect();
        }

        let mut ordered = valid;
        ordered.sort_by_key(|floor| logical_floor_order(floor.floor_id.as_deref()));

        let mut allocated = Vec::with_capacity(floors.len() + 1);
        let mut cumulative = 0.0;
        let mut remaining_floors = ordered.into_iter();

        while let Some(floor) = remaining_floors.next() {
            let builtup = floor.builtup_area_sq_feet;
            if cumulative + builtup <= area_cap {
                allocated.push(tagged(floor, SplitRow::BalancedPart, AllocationStatus::Balanced));
                cumulative += builtup;
                continue;
            }

            let remaining = area_cap - cumulative;
            let overflow = builtup - remaining;
            debug!(
                property = %floor.property_code,
                floor = ?floor.floor_id,
                remaining,
                overflow,
                "splitting floor at area cap"
            );

            if remaining > 0.0 {
                allocated.push(split_part(
                    floor,
                    remaining,
                    None,
                    SplitRow::BalancedPart,
                    AllocationStatus::Balanced,
                ));
            }
            allocated.push(split_part(
                floor,
                overflow,
                Some(self.config.excess_construction_year),
                SplitRow::OverflowSplit,
                AllocationStatus::Excess,
            ));
            allocated.extend(
                remaining_floors
                    .by_ref()
                    .map(|floor| self.excess(floor, SplitRow::AfterOverflow)),
            );
            break;
        }

        allocated.extend(
            other
                .into_iter()
                .map(|floor| self.excess(floor, SplitRow::NonResidential)),
        );
        allocated
    }

    fn within_cap(&self, floor: &FloorRecord) -> SplitFloorRecord {
        if self.config.is_residential(floor.type_of_use.trim()) {
            tagged(floor, SplitRow::BalancedPart, AllocationStatus::Balanced)
        } else {
            self.excess(floor, SplitRow::NonResidential)
        }
    }

    /// Whole floor marked excess, areas untouched
    fn excess(&self, floor: &FloorRecord, split_row: SplitRow) -> SplitFloorRecord {
        SplitFloorRecord {
            record: FloorRecord {
                construction_year: Some(self.config.excess_construction_year),
                ..floor.clone()
            },
            split_row,
            status: AllocationStatus::Excess,
        }
    }
}

fn tagged(floor: &FloorRecord, split_row: SplitRow, status: AllocationStatus) -> SplitFloorRecord {
    SplitFloorRecord {
        record: floor.clone(),
        split_row,
        status,
    }
}

/// Part of a floor carrying `builtup` square feet, carpet scaled to match
fn split_part(
    floor: &FloorRecord,
    builtup: f64,
    year_override: Option<i64>,
    split_row: SplitRow,
    status: AllocationStatus,
) -> SplitFloorRecord {
    SplitFloorRecord {
        record: FloorRecord {
            builtup_area_sq_feet: builtup,
            carpet_area_sq_feet: scale_carpet(
                floor.carpet_area_sq_feet,
                builtup,
                floor.builtup_area_sq_feet,
            ),
            construction_year: year_override.or(floor.construction_year),
            ..floor.clone()
        },
        split_row,
        status,
    }
}

/// Carpet area for `part` of `whole` built-up area
pub fn scale_carpet(carpet: f64, part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        carpet
    } else {
        carpet * (part / whole)
    }
}
