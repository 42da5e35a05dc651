use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_FLOAT_PRECISION, DEFAULT_GRAPHS_DIR, GraphOptions, ProcessOptions};

/// Parse benchmark logs into CSV summaries
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct ProcessArgs {
    /// Root of the results tree (<difficulty>/n<nodes>/g<granularity>/r<repeat>)
    #[arg(value_name = "RESULTS_DIR")]
    pub results_dir: PathBuf,

    /// Directory the CSV files are written to
    #[arg(long, env = "FRACTAL_RESULTS_OUT", default_value = ".")]
    pub output_dir: PathBuf,

    /// Decimals written for floating-point columns
    #[arg(long, default_value_t = DEFAULT_FLOAT_PRECISION)]
    pub precision: usize,

    /// Fail if a trial lacks its client or coordinator log
    #[arg(long, default_value_t = false)]
    pub require_logs: bool,

    /// Only build the trial summary (skip worker logs)
    #[arg(long, default_value_t = false)]
    pub no_workers: bool,
}

impl ProcessArgs {
    pub fn options(&self) -> ProcessOptions {
        ProcessOptions {
            output_dir: self.output_dir.clone(),
            precision: self.precision,
            require_logs: self.require_logs,
            include_workers: !self.no_workers,
        }
    }
}

/// Render comparison graphs from the CSV summaries
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct GraphArgs {
    /// Client/coordinator summary CSV (experiment_results.csv)
    #[arg(value_name = "SUMMARY_CSV")]
    pub summary_csv: PathBuf,

    /// Worker totals CSV (worker_totals.csv)
    #[arg(value_name = "WORKER_TOTALS_CSV")]
    pub worker_totals_csv: PathBuf,

    /// Directory the graphs are written to
    #[arg(long, env = "FRACTAL_GRAPHS_DIR", default_value = DEFAULT_GRAPHS_DIR)]
    pub graphs_dir: PathBuf,

    /// Also write an interactive HTML report per case
    #[arg(long, default_value_t = false)]
    pub html: bool,
}

impl GraphArgs {
    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            graphs_dir: self.graphs_dir.clone(),
            html_report: self.html,
        }
    }
}
