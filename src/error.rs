//! Error handling for bifurcation runs.
//!
//! File-level failures (unreadable input, unresolvable columns, unwritable
//! output) abort a whole batch. Row-level processing has no failure path.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BifurcationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Error reading file {path}: {reason}")]
    InputRead { path: PathBuf, reason: String },

    #[error("Cannot find any of: {required:?}\nColumns available: {available:?}")]
    ColumnNotFound {
        required: Vec<String>,
        available: Vec<String>,
    },

    #[error("Error saving file {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BifurcationError {
    pub fn input_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn column_not_found(required: &[&str], available: &[String]) -> Self {
        Self::ColumnNotFound {
            required: required.iter().map(|name| name.to_string()).collect(),
            available: available.to_vec(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BifurcationError>;
