//! Area Bifurcation Library
//!
//! Turns property record tables into categorized area breakdowns and
//! allocates floor-level areas against declared property caps.
//!
//! This library provides tools for:
//! - Extracting area tokens from free-text Marathi/English construction
//!   descriptions and splitting them into RCC, parking, construction,
//!   temporary-shed and open-space totals
//! - Classifying whole records by a normalized construction-type label
//! - Ordering floors canonically and splitting the floor that crosses a
//!   property's area cap into balanced and excess parts
//! - Reading xlsx/xls/ods/csv/parquet tables and writing highlighted results

pub mod allocator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod models;
pub mod processor;
pub mod table;

pub use allocator::FloorAllocator;
pub use config::{BifurcationConfig, OutputFormat};
pub use error::{BifurcationError, Result};
pub use extractor::AreaExtractor;
pub use models::{
    AllocationStatus, AreaCategory, AreaRecord, AreaResult, FloorRecord, SplitFloorRecord,
    SplitRow, UnmatchedTypes,
};
pub use processor::{
    LogSink, ProgressSink, PropertyBatchProcessor, ResidentialBatchProcessor,
    run_residential_job, run_split_job,
};
