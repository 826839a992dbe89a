use anyhow::{Context, Result};
use area_bifurcation::cli::{
    Args, Commands, job_sink, print_residential_summary, print_split_summary, setup_logging,
};
use area_bifurcation::{run_residential_job, run_split_job};
use clap::Parser;
use colored::*;
use std::process;
use tokio::task;
use tracing::error;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // A handler that fails to install never fires
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.to_config();
    config.validate().context("Invalid configuration")?;
    let quiet = args.quiet;

    match args.command {
        Commands::Residential { inputs } => {
            let total = inputs.len();
            let mut failures = 0;

            for input in inputs {
                let job_config = config.clone();
                let job_input = input.clone();
                let outcome = task::spawn_blocking(move || {
                    let sink = job_sink(quiet, "Extracting areas...");
                    run_residential_job(&job_input, &job_config, sink.as_ref())
                })
                .await
                .context("Residential worker task failed")?;

                match outcome {
                    Ok(report) => print_residential_summary(&input, &report),
                    Err(e) => {
                        failures += 1;
                        error!("Residential run for {} failed: {}", input.display(), e);
                    }
                }
            }

            if failures > 0 {
                anyhow::bail!("{} of {} residential runs failed", failures, total);
            }
            Ok(())
        }
        Commands::Split {
            area_file,
            floor_file,
        } => {
            let report = task::spawn_blocking(move || {
                let sink = job_sink(quiet, "Splitting floor areas...");
                run_split_job(&area_file, &floor_file, &config, sink.as_ref())
            })
            .await
            .context("Split worker task failed")?
            .context("Property area split failed")?;

            print_split_summary(&report);
            Ok(())
        }
    }
}
