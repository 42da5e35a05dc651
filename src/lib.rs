//! # Fractal benchmark result analysis
//!
//! Turns the log tree written by the distributed fractal renderer benchmark
//! (client, coordinator, workers) into CSV tables, and those tables into
//! comparison graphs.
//!
//! ## Layout of a results tree
//! `<difficulty>/n<nodes>/g<granularity>/r<repeat>/` holding
//! `client_log.txt`, `coordinator_log.txt` and `worker_<id>.txt`.
//!
//! ## Outputs
//! - `experiment_results.csv`: one row per trial, one column per `<prefix>_<tag>`.
//! - `worker_payloads.csv` / `worker_totals.csv`: one row per worker log line.
//! - `graphs/*.png`: client time, speedup, efficiency and worker compute per case.

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod graphs;
pub mod model;
pub mod parsing;
pub mod utils;

pub use collect::{Results, process_results};
pub use error::{AnalysisError, Result};

/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
