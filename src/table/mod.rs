//! Spreadsheet I/O for bifurcation runs.
//!
//! Reads source tables into polars frames, resolves columns by loose name
//! matching, normalizes cell values and writes result tables with optional
//! per-row highlighting.

pub mod columns;
pub mod reader;
pub mod values;
pub mod writer;

pub use columns::{column_names, detect_column, find_column};
pub use reader::read_table;
pub use writer::{TableWriter, timestamped_output_path, write_unmatched_labels};
