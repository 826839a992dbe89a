//! Property split batch processing.
//!
//! Groups floor rows by property code, allocates each property's floors
//! against its cap from the caps table and assembles one combined table.
//! Floor columns are carried through unchanged except the allocated
//! built-up, carpet and year values.

use super::progress::{ProgressSink, is_progress_point};

use crate::allocator::FloorAllocator;
use crate::config::BifurcationConfig;
use crate::constants::{column_aliases, output_columns};
use crate::error::Result;
use crate::models::{FloorRecord, PropertyAreaCap, RowStyle, SplitFloorRecord, SplitRow, SplitStats};
use crate::table::detect_column;
use crate::table::values::{cell_key, cell_number, cell_year};

use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Result of a split batch
#[derive(Debug, Clone)]
pub struct SplitOutput {
    pub table: DataFrame,
    /// Highlight for each row of `table`
    pub row_styles: Vec<RowStyle>,
    pub stats: SplitStats,
}

/// Resolved floor table columns, paired with their canonical names
struct FloorColumns {
    renames: Vec<(String, &'static str)>,
}

impl FloorColumns {
    fn resolve(floors: &DataFrame) -> Result<Self> {
        let wanted = [
            (column_aliases::FLOOR_PROPERTY_CODE, output_columns::PROPERTY_CODE),
            (column_aliases::FLOOR_ID, output_columns::FLOOR_ID),
            (column_aliases::BUILTUP_AREA, output_columns::BUILTUP_AREA),
            (column_aliases::TYPE_OF_USE, output_columns::TYPE_OF_USE),
            (column_aliases::CONSTRUCTION_YEAR, output_columns::CONSTRUCTION_YEAR),
            (column_aliases::CARPET_AREA, output_columns::CARPET_AREA),
        ];

        let renames = wanted
            .into_iter()
            .map(|(aliases, canonical)| Ok((detect_column(floors, aliases)?, canonical)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { renames })
    }

    /// Copy of `floors` with resolved columns under their canonical names
    fn canonical_table(&self, floors: &DataFrame) -> Result<DataFrame> {
        let mut table = floors.clone();
        for (found, canonical) in &self.renames {
            if found != canonical {
                debug!("Renaming floor column '{}' to '{}'", found, canonical);
                table.rename(found, (*canonical).into())?;
            }
        }
        Ok(table)
    }
}

/// Drives the floor allocator over every property in a caps table
#[derive(Debug, Clone)]
pub struct PropertyBatchProcessor {
    allocator: FloorAllocator,
    progress_interval: usize,
}

impl Default for PropertyBatchProcessor {
    fn default() -> Self {
        Self::new(&BifurcationConfig::default())
    }
}

impl PropertyBatchProcessor {
    pub fn new(config: &BifurcationConfig) -> Self {
        Self {
            allocator: FloorAllocator::new(config.allocation.clone()),
            progress_interval: config.property_progress_interval,
        }
    }

    /// Allocate the floors of every property in `caps`.
    ///
    /// Column resolution happens before any row is processed; a missing
    /// column aborts the run.
    pub fn run(
        &self,
        caps: &DataFrame,
        floors: &DataFrame,
        sink: &dyn ProgressSink,
    ) -> Result<SplitOutput> {
        let code_column = detect_column(caps, column_aliases::PROPERTY_CODE)?;
        let cap_column = detect_column(caps, column_aliases::AREA_CAP)?;
        let floor_table = FloorColumns::resolve(floors)?.canonical_table(floors)?;

        let grouped = group_floors(&floor_table)?;
        let caps = read_caps(caps, &code_column, &cap_column)?;
        debug!(
            "{} properties in caps table, {} properties with floors",
            caps.len(),
            grouped.len()
        );

        let mut stats = SplitStats::default();
        let mut seen = HashSet::new();
        let mut allocated: Vec<SplitFloorRecord> = Vec::new();
        let total = caps.len();

        for (index, cap) in caps.iter().enumerate() {
            if let Some(cap) = cap {
                if seen.insert(cap.property_code.as_str()) {
                    stats.properties_seen += 1;
                    let floors = grouped
                        .get(cap.property_code.as_str())
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    let rows = self.allocator.allocate(cap.area_r, floors);

                    if rows.is_empty() {
                        stats.properties_skipped += 1;
                    } else {
                        stats.properties_allocated += 1;
                        stats.overflow_splits += rows
                            .iter()
                            .filter(|row| row.split_row == SplitRow::OverflowSplit)
                            .count();
                    }
                    allocated.extend(rows);
                } else {
                    warn!(
                        "Property {} appears more than once in the caps table; using its first row",
                        cap.property_code
                    );
                    stats.duplicate_properties += 1;
                }
            }

            if is_progress_point(index + 1, self.progress_interval) {
                sink.report(&format!("Processed {}/{} properties...", index + 1, total));
            }
        }

        stats.rows_emitted = allocated.len();
        if allocated.is_empty() {
            warn!("No floor rows were allocated; the combined table is empty");
        }

        let table = build_split_table(&floor_table, &allocated)?;
        let row_styles = allocated.iter().map(SplitFloorRecord::row_style).collect();
        Ok(SplitOutput {
            table,
            row_styles,
            stats,
        })
    }
}

/// Caps in table order; rows without a property code are `None`
fn read_caps(
    caps: &DataFrame,
    code_column: &str,
    cap_column: &str,
) -> Result<Vec<Option<PropertyAreaCap>>> {
    let codes = caps.column(code_column)?;
    let areas = caps.column(cap_column)?;

    (0..caps.height())
        .map(|row| {
            let code = cell_key(&codes.get(row)?);
            let area_r = cell_number(&areas.get(row)?).unwrap_or(0.0);
            Ok(code.map(|property_code| PropertyAreaCap {
                property_code,
                area_r,
            }))
        })
        .collect()
}

/// Floor records keyed by property code, in table order within each property
fn group_floors(floor_table: &DataFrame) -> Result<HashMap<String, Vec<FloorRecord>>> {
    let codes = floor_table.column(output_columns::PROPERTY_CODE)?;
    let floor_ids = floor_table.column(output_columns::FLOOR_ID)?;
    let builtup = floor_table.column(output_columns::BUILTUP_AREA)?;
    let carpet = floor_table.column(output_columns::CARPET_AREA)?;
    let use_types = floor_table.column(output_columns::TYPE_OF_USE)?;
    let years = floor_table.column(output_columns::CONSTRUCTION_YEAR)?;

    let mut grouped: HashMap<String, Vec<FloorRecord>> = HashMap::new();
    for row in 0..floor_table.height() {
        let Some(property_code) = cell_key(&codes.get(row)?) else {
            continue;
        };
        let record = FloorRecord {
            source_row: row,
            property_code: property_code.clone(),
            floor_id: cell_key(&floor_ids.get(row)?),
            builtup_area_sq_feet: cell_number(&builtup.get(row)?).unwrap_or(0.0),
            carpet_area_sq_feet: cell_number(&carpet.get(row)?).unwrap_or(0.0),
            type_of_use: cell_key(&use_types.get(row)?).unwrap_or_default(),
            construction_year: cell_year(&years.get(row)?),
        };
        grouped.entry(property_code).or_default().push(record);
    }
    Ok(grouped)
}

/// Source rows for each allocated record, with allocated values and tags set
fn build_split_table(floor_table: &DataFrame, allocated: &[SplitFloorRecord]) -> Result<DataFrame> {
    // source rows index a frame, so they fit IdxSize
    let indices: Vec<IdxSize> = allocated
        .iter()
        .map(|row| row.record.source_row as IdxSize)
        .collect();
    let mut table = floor_table.take(&IdxCa::from_vec("source_row".into(), indices))?;

    let builtup: Vec<f64> = allocated
        .iter()
        .map(|row| row.record.builtup_area_sq_feet)
        .collect();
    let carpet: Vec<f64> = allocated
        .iter()
        .map(|row| row.record.carpet_area_sq_feet)
        .collect();
    let years: Vec<Option<i64>> = allocated
        .iter()
        .map(|row| row.record.construction_year)
        .collect();
    let split_rows: Vec<&str> = allocated.iter().map(|row| row.split_row.as_str()).collect();
    let statuses: Vec<&str> = allocated.iter().map(|row| row.status.as_str()).collect();

    table.with_column(Column::new(output_columns::BUILTUP_AREA.into(), builtup))?;
    table.with_column(Column::new(output_columns::CARPET_AREA.into(), carpet))?;
    table.with_column(Column::new(output_columns::CONSTRUCTION_YEAR.into(), years))?;
    table.with_column(Column::new(output_columns::SPLIT_ROW.into(), split_rows))?;
    table.with_column(Column::new(output_columns::STATUS.into(), statuses))?;
    Ok(table)
}
