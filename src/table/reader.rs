//! Source table reading.
//!
//! Workbooks (xlsx, xlsm, xlsb, xls, ods) are read with calamine from their
//! first sheet; csv and parquet go through polars. Column names are trimmed.

use crate::error::{BifurcationError, Result};

use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::debug;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read the table at `path`, choosing the reader by file extension
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut df = match extension.as_str() {
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => read_workbook(path)?,
        "csv" => read_csv(path)?,
        "parquet" => read_parquet(path)?,
        other => {
            return Err(BifurcationError::input_read(
                path,
                format!("unsupported file extension '{other}'"),
            ));
        }
    };

    trim_column_names(&mut df).map_err(|e| BifurcationError::input_read(path, e))?;
    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| BifurcationError::input_read(path, e))
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| BifurcationError::input_read(path, e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| BifurcationError::input_read(path, e))
}

fn read_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| BifurcationError::input_read(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BifurcationError::input_read(path, "workbook has no sheets"))?
        .map_err(|e| BifurcationError::input_read(path, e))?;

    frame_from_range(&range).map_err(|e| BifurcationError::input_read(path, e))
}

/// Build a frame from a sheet range whose first row is the header.
///
/// A column is Float64 when every non-empty cell is numeric, otherwise String.
pub fn frame_from_range(range: &Range<Data>) -> PolarsResult<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header_names(header)
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(index).unwrap_or(&Data::Empty))
                .collect();
            cells_to_column(name, &cells)
        })
        .collect();

    DataFrame::new(columns)
}

/// Header texts, naming blank headers by position and suffixing repeats
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let text = cell.to_string().trim().to_string();
            let base = if text.is_empty() {
                format!("column_{}", index + 1)
            } else {
                text
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

fn cells_to_column(name: String, cells: &[&Data]) -> Column {
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, Data::Empty | Data::Int(_) | Data::Float(_)));

    if numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(*v as f64),
                Data::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Empty => None,
                other => Some(other.to_string()),
            })
            .collect();
        Column::new(name.into(), values)
    }
}

fn trim_column_names(df: &mut DataFrame) -> PolarsResult<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.trim() != name.as_str())
        .map(|name| (name.to_string(), name.trim().to_string()))
        .collect();

    for (old, new) in renames {
        df.rename(&old, new.into())?;
    }
    Ok(())
}
