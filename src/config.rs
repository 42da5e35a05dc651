//! File-name conventions of the benchmark output tree and analysis defaults.

use std::path::PathBuf;

pub const CLIENT_LOG: &str = "client_log.txt";
pub const COORDINATOR_LOG: &str = "coordinator_log.txt";
pub const CLIENT_PREFIX: &str = "client";
pub const COORDINATOR_PREFIX: &str = "coord";

pub const SUMMARY_CSV: &str = "experiment_results.csv";
pub const WORKER_PAYLOADS_CSV: &str = "worker_payloads.csv";
pub const WORKER_TOTALS_CSV: &str = "worker_totals.csv";

pub const DEFAULT_FLOAT_PRECISION: usize = 9;
pub const PREVIEW_ROWS: usize = 5;

pub const DEFAULT_GRAPHS_DIR: &str = "graphs";
/// 4x3 inches at 300 dpi.
pub const FIGURE_SIZE_PX: (u32, u32) = (1200, 900);

/// Options for the log collection stage.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub output_dir: PathBuf,
    pub precision: usize,
    /// Fail when a trial lacks its client or coordinator log.
    pub require_logs: bool,
    pub include_workers: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            precision: DEFAULT_FLOAT_PRECISION,
            require_logs: false,
            include_workers: true,
        }
    }
}

/// Options for the graph stage.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub graphs_dir: PathBuf,
    pub html_report: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            graphs_dir: PathBuf::from(DEFAULT_GRAPHS_DIR),
            html_report: false,
        }
    }
}
