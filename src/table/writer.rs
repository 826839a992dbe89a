//! Result table writing.
//!
//! Xlsx output carries a bold header row and whole-row fills taken from each
//! row's [`RowStyle`]; csv and parquet output carry the data only. A file
//! left behind by a failed write is removed.

use crate::config::{OutputConfig, OutputFormat};
use crate::constants::OUTPUT_TIMESTAMP_FORMAT;
use crate::error::{BifurcationError, Result};
use crate::models::RowStyle;

use chrono::{DateTime, Local};
use polars::prelude::*;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Rows available below the header on one worksheet
const XLSX_MAX_DATA_ROWS: usize = 1_048_575;

/// `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.<ext>` for the given time
pub fn output_path_at(
    dir: &Path,
    prefix: &str,
    format: OutputFormat,
    timestamp: DateTime<Local>,
) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(OUTPUT_TIMESTAMP_FORMAT),
        format.extension()
    ))
}

pub fn timestamped_output_path(dir: &Path, prefix: &str, format: OutputFormat) -> PathBuf {
    output_path_at(dir, prefix, format, Local::now())
}

/// Write sorted unmatched labels, one per line, when there are any
pub fn write_unmatched_labels(
    dir: &Path,
    file_name: &str,
    labels: &[String],
) -> Result<Option<PathBuf>> {
    if labels.is_empty() {
        return Ok(None);
    }
    let path = dir.join(file_name);
    fs::write(&path, labels.join("\n")).map_err(|e| BifurcationError::output_write(&path, e))?;
    Ok(Some(path))
}

/// Writes result frames in the configured format
#[derive(Debug, Clone, Default)]
pub struct TableWriter {
    config: OutputConfig,
}

impl TableWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Write `df` to `path`.
    ///
    /// `styles` holds one entry per row and only affects xlsx output; missing
    /// entries are plain. `sheet_name` falls back to the workbook default.
    pub fn write(
        &self,
        df: &mut DataFrame,
        path: &Path,
        sheet_name: Option<&str>,
        styles: &[RowStyle],
    ) -> Result<()> {
        let outcome = match self.config.format {
            OutputFormat::Xlsx => self.write_xlsx(df, path, sheet_name, styles),
            OutputFormat::Csv => write_csv(df, path),
            OutputFormat::Parquet => write_parquet(df, path),
        };

        if let Err(e) = outcome {
            if path.exists() {
                if let Err(remove_err) = fs::remove_file(path) {
                    warn!(
                        "Could not remove partial output {}: {}",
                        path.display(),
                        remove_err
                    );
                }
            }
            return Err(e);
        }

        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }

    fn write_xlsx(
        &self,
        df: &DataFrame,
        path: &Path,
        sheet_name: Option<&str>,
        styles: &[RowStyle],
    ) -> Result<()> {
        if df.height() > XLSX_MAX_DATA_ROWS {
            return Err(BifurcationError::output_write(
                path,
                format!("{} rows exceed the worksheet row limit", df.height()),
            ));
        }
        let xlsx_err = |e: rust_xlsxwriter::XlsxError| BifurcationError::output_write(path, e);

        let formats = RowFormats::new(&self.config);
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if let Some(name) = sheet_name {
            worksheet.set_name(name).map_err(xlsx_err)?;
        }

        for (col_index, column) in df.get_columns().iter().enumerate() {
            let col = u16::try_from(col_index).map_err(|_| {
                BifurcationError::output_write(path, "too many columns for a worksheet")
            })?;
            worksheet
                .write_string_with_format(0, col, column.name().as_str(), &formats.header)
                .map_err(xlsx_err)?;

            for row_index in 0..df.height() {
                let style = styles.get(row_index).copied().unwrap_or_default();
                let value = column.get(row_index)?;
                // bounded by XLSX_MAX_DATA_ROWS
                let row = (row_index + 1) as u32;
                write_cell(worksheet, row, col, &value, formats.for_style(style))
                    .map_err(xlsx_err)?;
            }
        }

        workbook.save(path).map_err(xlsx_err)?;
        Ok(())
    }
}

struct RowFormats {
    header: Format,
    plain: Format,
    balanced: Format,
    excess: Format,
}

impl RowFormats {
    fn new(config: &OutputConfig) -> Self {
        Self {
            header: Format::new().set_bold(),
            plain: Format::new(),
            balanced: Format::new().set_background_color(Color::RGB(config.balanced_fill)),
            excess: Format::new().set_background_color(Color::RGB(config.excess_fill)),
        }
    }

    fn for_style(&self, style: RowStyle) -> Option<&Format> {
        match style {
            RowStyle::Plain => None,
            RowStyle::Balanced => Some(&self.balanced),
            RowStyle::Excess => Some(&self.excess),
        }
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &AnyValue,
    fill: Option<&Format>,
) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    let blank = |worksheet: &mut Worksheet| match fill {
        Some(format) => worksheet.write_blank(row, col, format).map(|_| ()),
        None => Ok(()),
    };

    if value.is_null() {
        return blank(worksheet);
    }
    if let Some(text) = value.get_str() {
        return write_string(worksheet, row, col, text, fill);
    }
    if let AnyValue::Boolean(flag) = value {
        return match fill {
            Some(format) => worksheet.write_boolean_with_format(row, col, *flag, format),
            None => worksheet.write_boolean(row, col, *flag),
        }
        .map(|_| ());
    }
    match value.extract::<f64>() {
        Some(number) if number.is_finite() => match fill {
            Some(format) => worksheet.write_number_with_format(row, col, number, format),
            None => worksheet.write_number(row, col, number),
        }
        .map(|_| ()),
        Some(_) => blank(worksheet),
        None => write_string(worksheet, row, col, &value.to_string(), fill),
    }
}

fn write_string(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    text: &str,
    fill: Option<&Format>,
) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    match fill {
        Some(format) => worksheet.write_string_with_format(row, col, text, format),
        None => worksheet.write_string(row, col, text),
    }
    .map(|_| ())
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| BifurcationError::output_write(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| BifurcationError::output_write(path, e))
}

fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| BifurcationError::output_write(path, e))?;
    ParquetWriter::new(file)
        .finish(df)
        .map(|_| ())
        .map_err(|e| BifurcationError::output_write(path, e))
}
