//! Batch processing for both bifurcation pipelines.
//!
//! The batch processors work on in-memory tables. The file jobs wrap them
//! with reading, output naming, writing and terminal progress messages.

pub mod progress;
pub mod property;
pub mod residential;

#[cfg(test)]
pub mod tests;

pub use self::progress::{LogSink, ProgressSink};
pub use self::property::{PropertyBatchProcessor, SplitOutput};
pub use self::residential::{ResidentialBatchProcessor, ResidentialOutput};

use crate::config::BifurcationConfig;
use crate::error::Result;
use crate::models::{ResidentialJobReport, SplitJobReport};
use crate::table::{TableWriter, read_table, timestamped_output_path, write_unmatched_labels};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extract categorized areas for every row of a residential file.
///
/// Writes the augmented table and, when any label went unmatched, the
/// unmatched-labels file next to it.
pub fn run_residential_job(
    input_path: &Path,
    config: &BifurcationConfig,
    sink: &dyn ProgressSink,
) -> Result<ResidentialJobReport> {
    report_failure(sink, || {
        config.validate()?;
        let start = Instant::now();
        sink.report("Starting residential area bifurcation");
        sink.report(&format!("Reading file: {}", input_path.display()));

        let df = read_table(input_path)?;
        sink.report(&format!("Total rows to process: {}", df.height()));

        let ResidentialOutput {
            mut table,
            unmatched,
            stats,
        } = ResidentialBatchProcessor::new(config).run(&df, sink)?;

        let output_dir = output_dir_for(input_path, config);
        let output_path = timestamped_output_path(
            &output_dir,
            &config.output.residential_prefix,
            config.output.format,
        );
        TableWriter::new(config.output.clone()).write(&mut table, &output_path, None, &[])?;
        sink.report("Cleaning complete");
        sink.report(&format!("Output saved as: {}", output_path.display()));

        let labels = unmatched.reportable();
        let unmatched_path =
            write_unmatched_labels(&output_dir, &config.output.unmatched_file_name, &labels)?;
        if let Some(path) = &unmatched_path {
            sink.report(&format!(
                "{} unmatched construction types written to {}",
                labels.len(),
                path.display()
            ));
        }

        let processing_time_ms = start.elapsed().as_millis();
        sink.report(&format!(
            "Time taken: {:.2} seconds",
            processing_time_ms as f64 / 1000.0
        ));

        Ok(ResidentialJobReport {
            output_path,
            unmatched_path,
            stats,
            processing_time_ms,
        })
    })
}

/// Allocate floor areas of every property against the caps in `area_path`.
///
/// The combined table is written next to the caps file unless an output
/// directory is configured.
pub fn run_split_job(
    area_path: &Path,
    floor_path: &Path,
    config: &BifurcationConfig,
    sink: &dyn ProgressSink,
) -> Result<SplitJobReport> {
    report_failure(sink, || {
        config.validate()?;
        let start = Instant::now();
        sink.report("Starting property area split and proportional carpet calculation");

        let caps = read_table(area_path)?;
        let floors = read_table(floor_path)?;
        sink.report(&format!("Area file loaded: {} rows", caps.height()));
        sink.report(&format!("Floor file loaded: {} rows", floors.height()));
        sink.report("Processing properties...");

        let SplitOutput {
            mut table,
            row_styles,
            stats,
        } = PropertyBatchProcessor::new(config).run(&caps, &floors, sink)?;

        let output_path = timestamped_output_path(
            &output_dir_for(area_path, config),
            &config.output.split_prefix,
            config.output.format,
        );
        sink.report(&format!("Saving output: {}", output_path.display()));
        TableWriter::new(config.output.clone()).write(
            &mut table,
            &output_path,
            Some(config.output.sheet_name.as_str()),
            &row_styles,
        )?;

        let processing_time_ms = start.elapsed().as_millis();
        sink.report("Process completed successfully");
        sink.report(&format!("Output file: {}", output_path.display()));
        sink.report(&format!(
            "Time taken: {:.2} seconds",
            processing_time_ms as f64 / 1000.0
        ));

        Ok(SplitJobReport {
            output_path,
            stats,
            processing_time_ms,
        })
    })
}

/// Configured output directory, else the directory holding `input_path`
pub fn output_dir_for(input_path: &Path, config: &BifurcationConfig) -> PathBuf {
    match &config.output.output_dir {
        Some(dir) => dir.clone(),
        None => input_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    }
}

/// Send a terminal failure message to the sink before returning the error
fn report_failure<T>(sink: &dyn ProgressSink, job: impl FnOnce() -> Result<T>) -> Result<T> {
    job().inspect_err(|e| sink.report(&format!("Error: {}", e)))
}
