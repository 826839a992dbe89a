//! Tests for the batch processors and file jobs
//!
//! Batch tests build frames in memory; job tests go through real files in a
//! temporary directory.

pub mod property_batch;

use crate::table::values::{cell_number, cell_text};
use polars::prelude::DataFrame;
use std::cell::RefCell;

/// Sink that keeps every message for later inspection
#[derive(Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn progress_messages(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| m.starts_with("Processed"))
            .collect()
    }
}

impl crate::processor::ProgressSink for RecordingSink {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

pub fn number_at(df: &DataFrame, column: &str, row: usize) -> f64 {
    let value = df.column(column).unwrap().get(row).unwrap();
    cell_number(&value).unwrap_or_else(|| panic!("{column}[{row}] is not a number: {value:?}"))
}

pub fn text_at(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    cell_text(&df.column(column).unwrap().get(row).unwrap())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
