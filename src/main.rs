//! # process_results
//! Walks a benchmark results tree and writes three CSV tables:
//! - `experiment_results.csv`: per-trial client/coordinator metrics.
//! - `worker_payloads.csv`: one row per worker payload line.
//! - `worker_totals.csv`: one row per worker total line.
//!
//! Usage: `process_results <results_directory> [--output-dir DIR]`

use std::error::Error;

use clap::Parser;
use log::info;

use fractal_bench_analysis::{
    cli::ProcessArgs,
    config::PREVIEW_ROWS,
    init_logging,
    process_results,
    utils::export::{export_all, format_preview},
};

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = ProcessArgs::parse();
    let options = args.options();

    info!("=== PROCESSING {} ===", args.results_dir.display());
    let results = process_results(&args.results_dir, &options)?;
    println!("Processed {} trials", results.summaries.len());

    println!("\nFirst few rows of main results:");
    println!("{}\n", format_preview(&results, PREVIEW_ROWS, options.precision));

    let report = export_all(&options.output_dir, &results, options.precision)?;
    for (path, rows) in &report.written {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("Saved {} ({} rows)", name, rows);
    }

    Ok(())
}
