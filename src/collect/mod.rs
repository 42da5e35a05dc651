//! Walks a results tree and assembles the summary and worker tables.
//!
//! One summary row per trial directory; client metrics precede coordinator
//! metrics. Worker rows are optional and come from `worker_<id>.txt` files.

pub mod trial;

use std::path::Path;

use log::{debug, info};

use crate::{
    config::{CLIENT_LOG, CLIENT_PREFIX, COORDINATOR_LOG, COORDINATOR_PREFIX, ProcessOptions},
    error::{AnalysisError, Result},
    model::{TrialSummary, WorkerRecord},
    parsing::{parse_log_file, parse_worker_logs},
};

pub use trial::{TrialDir, discover_trials, parse_param};

/// The three tables produced by one run, already sorted.
#[derive(Debug, Default, Clone)]
pub struct Results {
    pub summaries: Vec<TrialSummary>,
    pub worker_payloads: Vec<WorkerRecord>,
    pub worker_totals: Vec<WorkerRecord>,
}

impl Results {
    /// Union of metric columns in order of first appearance.
    pub fn metric_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for summary in &self.summaries {
            for key in summary.metrics.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    fn sort(&mut self) {
        self.summaries.sort_by(|a, b| a.key.cmp(&b.key));
        for rows in [&mut self.worker_payloads, &mut self.worker_totals] {
            rows.sort_by(|a, b| a.key.cmp(&b.key).then(a.worker_id.cmp(&b.worker_id)));
        }
    }
}

/// Parses every trial below `root` into sorted tables.
pub fn process_results(root: &Path, options: &ProcessOptions) -> Result<Results> {
    let mut results = Results::default();

    for trial in discover_trials(root)? {
        info!("Processing: {}", trial.label);

        let client_path = trial.path.join(CLIENT_LOG);
        let coordinator_path = trial.path.join(COORDINATOR_LOG);
        if options.require_logs {
            require(&client_path, &trial, CLIENT_LOG)?;
            require(&coordinator_path, &trial, COORDINATOR_LOG)?;
        }

        let mut metrics = parse_log_file(&client_path, CLIENT_PREFIX)?;
        metrics.extend(parse_log_file(&coordinator_path, COORDINATOR_PREFIX)?);
        debug!("{}: {} metrics", trial.label, metrics.len());

        if options.include_workers {
            let (payloads, totals) = parse_worker_logs(&trial.path, &trial.key)?;
            results.worker_payloads.extend(payloads);
            results.worker_totals.extend(totals);
        }

        results.summaries.push(TrialSummary {
            key: trial.key,
            metrics,
        });
    }

    results.sort();
    Ok(results)
}

fn require(path: &Path, trial: &TrialDir, file: &'static str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AnalysisError::MissingLog {
            trial: trial.label.clone(),
            file,
        })
    }
}
