//! Residential batch processing.
//!
//! Runs the area extractor over every row of a residential table and appends
//! the categorized area columns.

use super::progress::{ProgressSink, is_progress_point};

use crate::config::BifurcationConfig;
use crate::constants::{column_aliases, output_columns};
use crate::error::Result;
use crate::extractor::AreaExtractor;
use crate::models::{AreaRecord, AreaResult, ExtractionMode, ResidentialStats, UnmatchedTypes};
use crate::table::find_column;
use crate::table::values::{cell_number, cell_text};

use polars::prelude::*;
use tracing::{debug, warn};

/// Result of a residential batch
#[derive(Debug, Clone)]
pub struct ResidentialOutput {
    /// Input table with the seven area columns appended
    pub table: DataFrame,
    pub unmatched: UnmatchedTypes,
    pub stats: ResidentialStats,
}

/// Source columns feeding the extractor; absent columns read as empty
#[derive(Debug, Clone, Default)]
struct InputColumns {
    description: Option<String>,
    declared_total: Option<String>,
    construction_type: Option<String>,
}

impl InputColumns {
    fn resolve(df: &DataFrame) -> Self {
        let resolve = |aliases: &[&str]| {
            let found = find_column(df, aliases);
            if found.is_none() {
                warn!(
                    "No column matching {:?}; treating its values as absent",
                    aliases
                );
            }
            found
        };

        Self {
            description: resolve(column_aliases::DESCRIPTION),
            declared_total: resolve(column_aliases::DECLARED_TOTAL),
            construction_type: resolve(column_aliases::CONSTRUCTION_TYPE),
        }
    }
}

/// Drives the extractor over a residential table
#[derive(Debug, Clone)]
pub struct ResidentialBatchProcessor {
    extractor: AreaExtractor,
    progress_interval: usize,
}

impl Default for ResidentialBatchProcessor {
    fn default() -> Self {
        Self::new(&BifurcationConfig::default())
    }
}

impl ResidentialBatchProcessor {
    pub fn new(config: &BifurcationConfig) -> Self {
        Self {
            extractor: AreaExtractor::new(config.extraction.clone()),
            progress_interval: config.residential_progress_interval,
        }
    }

    pub fn run(&self, df: &DataFrame, sink: &dyn ProgressSink) -> Result<ResidentialOutput> {
        let columns = InputColumns::resolve(df);
        let description = lookup(df, columns.description.as_deref())?;
        let declared_total = lookup(df, columns.declared_total.as_deref())?;
        let construction_type = lookup(df, columns.construction_type.as_deref())?;

        let total_rows = df.height();
        let mut unmatched = UnmatchedTypes::new();
        let mut stats = ResidentialStats::default();
        let mut results = Vec::with_capacity(total_rows);

        for row in 0..total_rows {
            let record = AreaRecord {
                description: text_at(description, row)?,
                declared_total: match declared_total {
                    Some(column) => cell_number(&column.get(row)?),
                    None => None,
                },
                construction_type: text_at(construction_type, row)?,
            };

            let result = self.extractor.extract(&record, &mut unmatched);
            match result.mode {
                ExtractionMode::Contextual => stats.contextual_rows += 1,
                ExtractionMode::Direct => stats.direct_rows += 1,
            }
            if result.raw_area_text.is_none() {
                stats.rows_without_area_text += 1;
            }
            results.push(result);

            if is_progress_point(row + 1, self.progress_interval) {
                sink.report(&format!("Processed {}/{} rows...", row + 1, total_rows));
            }
        }

        stats.rows_processed = total_rows;
        stats.unmatched_labels = unmatched.reportable().len();
        debug!("Residential batch stats: {:?}", stats);

        let table = append_area_columns(df, &results)?;
        Ok(ResidentialOutput {
            table,
            unmatched,
            stats,
        })
    }
}

fn lookup<'a>(df: &'a DataFrame, name: Option<&str>) -> Result<Option<&'a Column>> {
    Ok(match name {
        Some(name) => Some(df.column(name)?),
        None => None,
    })
}

fn text_at(column: Option<&Column>, row: usize) -> Result<String> {
    Ok(match column {
        Some(column) => cell_text(&column.get(row)?).unwrap_or_default(),
        None => String::new(),
    })
}

/// Copy of `df` with the result columns set, replacing same-named columns
fn append_area_columns(df: &DataFrame, results: &[AreaResult]) -> Result<DataFrame> {
    let number_column = |name: &str, value: fn(&AreaResult) -> f64| {
        Column::new(name.into(), results.iter().map(value).collect::<Vec<f64>>())
    };

    let raw_text: Vec<Option<String>> = results.iter().map(|r| r.raw_area_text.clone()).collect();

    let mut table = df.clone();
    table.with_column(Column::new(output_columns::RAW_AREA_TEXT.into(), raw_text))?;
    table.with_column(number_column(output_columns::TOTAL_AREA, |r| r.total_area))?;
    table.with_column(number_column(output_columns::RCC, |r| r.rcc))?;
    table.with_column(number_column(output_columns::PARKING, |r| r.parking))?;
    table.with_column(number_column(output_columns::CONSTRUCTION, |r| r.construction))?;
    table.with_column(number_column(
        output_columns::TEMPORARY_SHED,
        |r| r.temporary_shed,
    ))?;
    table.with_column(number_column(output_columns::OPEN, |r| r.open))?;
    Ok(table)
}
