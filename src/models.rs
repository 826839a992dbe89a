//! Core data structures for area bifurcation.
//!
//! Defines the residential extraction records, the floor allocation records,
//! the row tags written to output tables and run statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

// =============================================================================
// Residential extraction
// =============================================================================

/// One residential input row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaRecord {
    pub description: String,
    pub declared_total: Option<f64>,
    pub construction_type: String,
}

impl AreaRecord {
    pub fn new(
        description: impl Into<String>,
        declared_total: Option<f64>,
        construction_type: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            declared_total,
            construction_type: construction_type.into(),
        }
    }

    /// Declared total, with absent and non-finite values read as zero
    pub fn declared_total_or_zero(&self) -> f64 {
        self.declared_total
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

/// Area categories a description can be split into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaCategory {
    Rcc,
    Parking,
    Construction,
    TemporaryShed,
    Open,
}

/// How a record was parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Per-token categorization from the surrounding keywords
    Contextual,
    /// Whole-record categorization from the construction-type label
    Direct,
}

/// Categorized area breakdown for one record.
///
/// The five category totals always sum to `total_area`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResult {
    pub raw_area_text: Option<String>,
    pub total_area: f64,
    pub rcc: f64,
    pub parking: f64,
    pub construction: f64,
    pub temporary_shed: f64,
    pub open: f64,
    pub mode: ExtractionMode,
}

impl AreaResult {
    pub fn empty(mode: ExtractionMode) -> Self {
        Self {
            raw_area_text: None,
            total_area: 0.0,
            rcc: 0.0,
            parking: 0.0,
            construction: 0.0,
            temporary_shed: 0.0,
            open: 0.0,
            mode,
        }
    }

    pub fn get(&self, category: AreaCategory) -> f64 {
        match category {
            AreaCategory::Rcc => self.rcc,
            AreaCategory::Parking => self.parking,
            AreaCategory::Construction => self.construction,
            AreaCategory::TemporaryShed => self.temporary_shed,
            AreaCategory::Open => self.open,
        }
    }

    pub fn add(&mut self, category: AreaCategory, value: f64) {
        let slot = match category {
            AreaCategory::Rcc => &mut self.rcc,
            AreaCategory::Parking => &mut self.parking,
            AreaCategory::Construction => &mut self.construction,
            AreaCategory::TemporaryShed => &mut self.temporary_shed,
            AreaCategory::Open => &mut self.open,
        };
        *slot += value;
    }

    pub fn category_sum(&self) -> f64 {
        self.rcc + self.parking + self.construction + self.temporary_shed + self.open
    }
}

/// Distinct construction-type labels that matched no classification rule.
///
/// Owned by a single batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmatchedTypes {
    labels: BTreeSet<String>,
}

impl UnmatchedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str) {
        if !self.labels.contains(label) {
            self.labels.insert(label.to_string());
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Sorted, deduplicated labels, skipping blank ones
    pub fn reportable(&self) -> Vec<String> {
        self.labels
            .iter()
            .filter(|label| !label.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// =============================================================================
// Floor allocation
// =============================================================================

/// One floor row of a property
#[derive(Debug, Clone, PartialEq)]
pub struct FloorRecord {
    /// Row index in the source floor table
    pub source_row: usize,
    pub property_code: String,
    pub floor_id: Option<String>,
    pub builtup_area_sq_feet: f64,
    pub carpet_area_sq_feet: f64,
    pub type_of_use: String,
    pub construction_year: Option<i64>,
}

/// Declared area cap of a property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAreaCap {
    pub property_code: String,
    pub area_r: f64,
}

/// Which part of the allocation a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitRow {
    BalancedPart,
    OverflowSplit,
    AfterOverflow,
    NonResidential,
}

impl SplitRow {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitRow::BalancedPart => "Balanced Part",
            SplitRow::OverflowSplit => "Overflow Split",
            SplitRow::AfterOverflow => "After Overflow",
            SplitRow::NonResidential => "Non-Residential",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationStatus {
    Balanced,
    Excess,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Balanced => "Balanced",
            AllocationStatus::Excess => "Excess",
        }
    }
}

/// Allocated floor row: the source fields with any changed values applied
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFloorRecord {
    pub record: FloorRecord,
    pub split_row: SplitRow,
    pub status: AllocationStatus,
}

impl SplitFloorRecord {
    pub fn row_style(&self) -> RowStyle {
        RowStyle::for_allocation(self.split_row, self.status)
    }
}

/// Highlight applied to a whole output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    #[default]
    Plain,
    Balanced,
    Excess,
}

impl RowStyle {
    pub fn for_allocation(split_row: SplitRow, status: AllocationStatus) -> Self {
        match (split_row, status) {
            (SplitRow::BalancedPart | SplitRow::OverflowSplit, _) => RowStyle::Balanced,
            (_, AllocationStatus::Excess) => RowStyle::Excess,
            _ => RowStyle::Plain,
        }
    }
}

// =============================================================================
// Run statistics
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidentialStats {
    pub rows_processed: usize,
    pub contextual_rows: usize,
    pub direct_rows: usize,
    pub rows_without_area_text: usize,
    pub unmatched_labels: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitStats {
    pub properties_seen: usize,
    pub properties_allocated: usize,
    pub properties_skipped: usize,
    pub duplicate_properties: usize,
    pub overflow_splits: usize,
    pub rows_emitted: usize,
}

#[derive(Debug, Clone)]
pub struct ResidentialJobReport {
    pub output_path: PathBuf,
    pub unmatched_path: Option<PathBuf>,
    pub stats: ResidentialStats,
    pub processing_time_ms: u128,
}

#[derive(Debug, Clone)]
pub struct SplitJobReport {
    pub output_path: PathBuf,
    pub stats: SplitStats,
    pub processing_time_ms: u128,
}
