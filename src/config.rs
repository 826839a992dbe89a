//! Configuration management and validation.
//!
//! Provides the run configuration for both pipelines: extraction context,
//! allocation policy, progress cadence and output naming.

use crate::constants;
use crate::error::{BifurcationError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Area extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Characters inspected before each area token in contextual mode
    pub context_window_chars: usize,

    /// Construction-type label that forces contextual mode
    pub mixed_use_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window_chars: constants::DEFAULT_CONTEXT_WINDOW_CHARS,
            mixed_use_marker: constants::MIXED_USE_MARKER.to_string(),
        }
    }
}

/// Floor allocation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Use types counted against the property cap
    pub residential_use_types: Vec<String>,

    /// Year stamped on excess rows
    pub excess_construction_year: i64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            residential_use_types: constants::RESIDENTIAL_USE_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            excess_construction_year: constants::EXCESS_CONSTRUCTION_YEAR,
        }
    }
}

impl AllocationConfig {
    pub fn is_residential(&self, type_of_use: &str) -> bool {
        self.residential_use_types.iter().any(|t| t == type_of_use)
    }
}

/// Supported output table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Excel workbook, with row highlighting for split output
    Xlsx,
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Detect format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "xlsx" => Some(OutputFormat::Xlsx),
            "csv" => Some(OutputFormat::Csv),
            "parquet" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }
}

/// Output naming and styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Directory for results; the input file's directory when unset
    pub output_dir: Option<PathBuf>,

    pub residential_prefix: String,
    pub split_prefix: String,
    pub unmatched_file_name: String,
    pub sheet_name: String,

    /// RGB fill for "Balanced Part" and "Overflow Split" rows
    pub balanced_fill: u32,

    /// RGB fill for other "Excess" rows
    pub excess_fill: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xlsx,
            output_dir: None,
            residential_prefix: constants::RESIDENTIAL_OUTPUT_PREFIX.to_string(),
            split_prefix: constants::SPLIT_OUTPUT_PREFIX.to_string(),
            unmatched_file_name: constants::UNMATCHED_TYPES_FILE_NAME.to_string(),
            sheet_name: constants::SPLIT_SHEET_NAME.to_string(),
            balanced_fill: constants::BALANCED_FILL_RGB,
            excess_fill: constants::EXCESS_FILL_RGB,
        }
    }
}

/// Global configuration for a bifurcation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BifurcationConfig {
    pub extraction: ExtractionConfig,

    pub allocation: AllocationConfig,

    /// Rows between residential progress reports
    pub residential_progress_interval: usize,

    /// Properties between split progress reports
    pub property_progress_interval: usize,

    pub output: OutputConfig,
}

impl Default for BifurcationConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            allocation: AllocationConfig::default(),
            residential_progress_interval: constants::RESIDENTIAL_PROGRESS_INTERVAL,
            property_progress_interval: constants::PROPERTY_PROGRESS_INTERVAL,
            output: OutputConfig::default(),
        }
    }
}

impl BifurcationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output table format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }

    /// Write results to `dir` instead of beside the input
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.output_dir = Some(dir.into());
        self
    }

    /// Set the year stamped on excess rows
    pub fn with_excess_year(mut self, year: i64) -> Self {
        self.allocation.excess_construction_year = year;
        self
    }

    /// Set the contextual keyword window
    pub fn with_context_window(mut self, chars: usize) -> Self {
        self.extraction.context_window_chars = chars;
        self
    }

    /// Replace the residential use-type set
    pub fn with_residential_use_types(mut self, types: Vec<String>) -> Self {
        self.allocation.residential_use_types = types;
        self
    }

    pub fn with_progress_intervals(mut self, rows: usize, properties: usize) -> Self {
        self.residential_progress_interval = rows;
        self.property_progress_interval = properties;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.residential_progress_interval == 0 || self.property_progress_interval == 0 {
            return Err(BifurcationError::Configuration {
                message: "progress intervals must be greater than zero".to_string(),
            });
        }
        if self.extraction.context_window_chars == 0 {
            return Err(BifurcationError::Configuration {
                message: "context window must be at least one character".to_string(),
            });
        }
        if self.allocation.residential_use_types.is_empty() {
            return Err(BifurcationError::Configuration {
                message: "at least one residential use type is required".to_string(),
            });
        }
        if self.output.sheet_name.trim().is_empty() {
            return Err(BifurcationError::Configuration {
                message: "sheet name cannot be empty".to_string(),
            });
        }
        if self.output.residential_prefix.trim().is_empty() || self.output.split_prefix.trim().is_empty()
        {
            return Err(BifurcationError::Configuration {
                message: "output file prefixes cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BifurcationConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.residential_progress_interval, 2000);
        assert_eq!(config.property_progress_interval, 100);
        assert_eq!(config.allocation.excess_construction_year, 2025);
        assert_eq!(config.extraction.context_window_chars, 60);
        assert_eq!(config.output.format, OutputFormat::Xlsx);
    }

    #[test]
    fn test_blank_output_names_rejected() {
        let mut config = BifurcationConfig::new();
        config.output.sheet_name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = BifurcationConfig::new();
        config.output.split_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = BifurcationConfig::new().with_progress_intervals(0, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = BifurcationConfig::new()
            .with_format(OutputFormat::Csv)
            .with_excess_year(2030)
            .with_context_window(40)
            .with_progress_intervals(10, 5)
            .with_output_dir("results");

        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.allocation.excess_construction_year, 2030);
        assert_eq!(config.extraction.context_window_chars, 40);
        assert_eq!(config.residential_progress_interval, 10);
        assert_eq!(config.property_progress_interval, 5);
        assert_eq!(config.output.output_dir, Some(PathBuf::from("results")));
    }

    #[test]
    fn test_empty_use_types_rejected() {
        let config = BifurcationConfig::new().with_residential_use_types(Vec::new());
        assert!(matches!(
            config.validate(),
            Err(BifurcationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_residential_membership_is_exact() {
        let allocation = AllocationConfig::default();
        assert!(allocation.is_residential("R"));
        assert!(allocation.is_residential("ICR"));
        assert!(!allocation.is_residential("C"));
        assert!(!allocation.is_residential("r"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/file.CSV")),
            Some(OutputFormat::Csv)
        );
        assert_eq!(OutputFormat::from_path(Path::new("file.txt")), None);
    }
}
