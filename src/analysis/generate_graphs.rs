//! Comparison graphs from the CSV summaries.
//!
//! Reads `experiment_results.csv` + `worker_totals.csv` → per case (difficulty):
//! client time, client speedup, parallel efficiency and worker compute PNGs,
//! plus an optional interactive HTML report.

use std::error::Error;

use clap::Parser;

use fractal_bench_analysis::{cli::GraphArgs, graphs::generate_graphs, init_logging};

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = GraphArgs::parse();

    let written = generate_graphs(&args.summary_csv, &args.worker_totals_csv, &args.options())?;

    println!("\nGraphs generated: {} files in {}", written.len(), args.graphs_dir.display());
    Ok(())
}
