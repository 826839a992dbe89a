//! Command-line interface components.

use crate::config::{BifurcationConfig, OutputFormat};
use crate::models::{ResidentialJobReport, SplitJobReport};
use crate::processor::{LogSink, ProgressSink};

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "bifurcate")]
#[command(about = "Split property area descriptions into categorized totals and allocate floor areas against property caps")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for output files (defaults to the input file's directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output table format
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Xlsx)]
    pub format: FormatArg,

    /// Construction year stamped on excess floor rows
    #[arg(long, global = true, value_name = "YEAR")]
    pub excess_year: Option<i64>,

    /// Characters inspected before each area token in mixed-use descriptions
    #[arg(long, global = true, value_name = "CHARS")]
    pub context_window: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Extract categorized areas from residential record files
    Residential {
        /// Residential tables to process, each as an independent run
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Allocate floor areas against property area caps
    Split {
        /// Table of property codes and area caps
        #[arg(value_name = "AREA_FILE")]
        area_file: PathBuf,

        /// Table of floor rows
        #[arg(value_name = "FLOOR_FILE")]
        floor_file: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Xlsx,
    Csv,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Run configuration with command-line overrides applied
    pub fn to_config(&self) -> BifurcationConfig {
        let mut config = BifurcationConfig::new().with_format(self.format.into());
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(year) = self.excess_year {
            config = config.with_excess_year(year);
        }
        if let Some(chars) = self.context_window {
            config = config.with_context_window(chars);
        }
        config
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("area_bifurcation={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Spinner that prints each progress message above itself
pub struct SpinnerSink {
    bar: ProgressBar,
}

impl SpinnerSink {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl ProgressSink for SpinnerSink {
    fn report(&self, message: &str) {
        if self.bar.is_hidden() {
            info!("{}", message);
        } else {
            self.bar.println(message);
        }
    }
}

impl Drop for SpinnerSink {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Progress sink for a job: a spinner normally, the log when quiet
pub fn job_sink(quiet: bool, message: &str) -> Box<dyn ProgressSink> {
    if quiet {
        Box::new(LogSink)
    } else {
        Box::new(SpinnerSink::new(message))
    }
}

pub fn print_residential_summary(input: &Path, report: &ResidentialJobReport) {
    let stats = &report.stats;
    println!(
        "\n{}",
        "Residential bifurcation complete".bright_green().bold()
    );
    println!("  {} {}", "Input:".bright_cyan(), input.display());
    println!("  {} {}", "Output:".bright_cyan(), report.output_path.display());
    println!(
        "  {} {} ({} mixed-use, {} by construction type)",
        "Rows processed:".bright_cyan(),
        stats.rows_processed.to_string().bright_white().bold(),
        stats.contextual_rows,
        stats.direct_rows
    );
    if stats.rows_without_area_text > 0 {
        println!(
            "  {} {}",
            "Rows without area text:".bright_cyan(),
            stats.rows_without_area_text
        );
    }
    if let Some(path) = &report.unmatched_path {
        println!(
            "  {} {} written to {}",
            "Unmatched construction types:".bright_yellow(),
            stats.unmatched_labels.to_string().bright_white().bold(),
            path.display()
        );
    }
    println!(
        "  {} {:.2}s",
        "Time taken:".bright_cyan(),
        report.processing_time_ms as f64 / 1000.0
    );
}

pub fn print_split_summary(report: &SplitJobReport) {
    let stats = &report.stats;
    println!("\n{}", "Property area split complete".bright_green().bold());
    println!("  {} {}", "Output:".bright_cyan(), report.output_path.display());
    println!(
        "  {} {} ({} allocated, {} skipped)",
        "Properties:".bright_cyan(),
        stats.properties_seen.to_string().bright_white().bold(),
        stats.properties_allocated,
        stats.properties_skipped
    );
    if stats.duplicate_properties > 0 {
        println!(
            "  {} {}",
            "Duplicate property rows ignored:".bright_yellow(),
            stats.duplicate_properties
        );
    }
    println!(
        "  {} {} ({} overflow splits)",
        "Rows written:".bright_cyan(),
        stats.rows_emitted.to_string().bright_white().bold(),
        stats.overflow_splits
    );
    println!(
        "  {} {:.2}s",
        "Time taken:".bright_cyan(),
        report.processing_time_ms as f64 / 1000.0
    );
}
