//! Graph stage: reads the summary and worker-total CSVs and renders per-case charts.
//!
//! The `difficulty` column is the case. For every case, in order of first
//! appearance:
//! - `client_dequeue_all_<case>.png`: client time to receive the full image.
//! - `client_speedup_<case>.png`: speedup relative to one node.
//! - `parallel_efficiency_<case>.png`: speedup divided by node count.
//! - `worker_compute_<case>.png`: mean worker total compute time.

pub mod render;
pub mod report;
pub mod series;

use std::{
    collections::HashMap,
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use log::{info, warn};
use polars::prelude::*;

use crate::{
    config::GraphOptions,
    error::{AnalysisError, Result},
    model::ParamValue,
};

use render::{ChartSpec, render_line_chart};
use report::{CaseCharts, write_report};
use series::{Observation, Series, efficiencies, group_series, speedups};

pub const CASE_COLUMN: &str = "difficulty";
pub const CLIENT_TIME_COLUMN: &str = "client_dequeue_all";
pub const WORKER_TIME_COLUMN: &str = "compute_time";

/// A CSV table loaded for plotting.
pub struct Table {
    path: PathBuf,
    df: DataFrame,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;
        Ok(Self {
            path: path.to_path_buf(),
            df,
        })
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    fn column(&self, name: &str, dtype: &DataType) -> Result<Column> {
        let column = self
            .df
            .column(name)
            .map_err(|_| AnalysisError::MissingColumn(name.to_string(), self.path.clone()))?;
        Ok(column.cast(dtype)?)
    }

    fn strings(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.column(name, &DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    fn floats(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.column(name, &DataType::Float64)?;
        Ok(column.f64()?.into_iter().collect())
    }

    /// Distinct case names in order of first appearance.
    pub fn cases(&self) -> Result<Vec<String>> {
        let mut cases: Vec<String> = Vec::new();
        for case in self.strings(CASE_COLUMN)?.into_iter().flatten() {
            if !cases.contains(&case) {
                cases.push(case);
            }
        }
        Ok(cases)
    }

    /// Rows with a case, granularity, node count and `value_column`, grouped by case.
    pub fn observations(&self, value_column: &str) -> Result<HashMap<String, Vec<Observation>>> {
        let cases = self.strings(CASE_COLUMN)?;
        let granularities = self.strings("granularity")?;
        let nodes = self.floats("num_nodes")?;
        let values = self.floats(value_column)?;

        let mut out: HashMap<String, Vec<Observation>> = HashMap::new();
        let mut skipped = 0usize;
        for (((case, granularity), num_nodes), value) in
            cases.into_iter().zip(granularities).zip(nodes).zip(values)
        {
            match (case, granularity, num_nodes, value) {
                (Some(case), Some(g), Some(num_nodes), Some(value)) => {
                    out.entry(case).or_default().push(Observation {
                        granularity: ParamValue::from_cell(&g),
                        num_nodes,
                        value,
                    });
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(
                "{}: {} rows without a numeric {} skipped",
                self.path.display(),
                skipped,
                value_column
            );
        }
        Ok(out)
    }
}

fn client_time_spec(case: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Time for client to get full fractal - Case: {}", case),
        x_label: "Node count",
        y_label: "Time (seconds)",
        y_range: None,
        reference_y: None,
    }
}

fn speedup_spec(case: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Client speedup vs node count - Case: {}", case),
        x_label: "Node count",
        y_label: "Speedup (relative to 1 node)",
        y_range: None,
        reference_y: Some(1.0),
    }
}

fn efficiency_spec(case: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Node Scaling Efficiency vs Node Count - Case: {}", case),
        x_label: "Node Count",
        y_label: "Node Efficiency (Speedup / Nodes)",
        y_range: Some((0.0, 1.1)),
        reference_y: None,
    }
}

fn worker_spec(case: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Worker compute time vs node count - Case: {}", case),
        x_label: "Node count",
        y_label: "Compute time (seconds)",
        y_range: None,
        reference_y: None,
    }
}

/// Renders every chart for every case; returns the files written.
pub fn generate_graphs(
    summary_csv: &Path,
    worker_totals_csv: &Path,
    options: &GraphOptions,
) -> Result<Vec<PathBuf>> {
    let summary = Table::read(summary_csv)?;
    let workers = Table::read(worker_totals_csv)?;

    let dir = &options.graphs_dir;
    create_dir_all(dir).map_err(|e| AnalysisError::io(dir, e))?;

    let client_obs = if summary.has_column(CLIENT_TIME_COLUMN) {
        summary.observations(CLIENT_TIME_COLUMN)?
    } else {
        warn!(
            "{} has no {} column; client graphs skipped",
            summary_csv.display(),
            CLIENT_TIME_COLUMN
        );
        HashMap::new()
    };
    let worker_obs = if workers.height() > 0 {
        workers.observations(WORKER_TIME_COLUMN)?
    } else {
        HashMap::new()
    };

    let mut written = Vec::new();
    for case in summary.cases()? {
        info!("Generating graphs for case: {}", case);

        let client = client_obs.get(&case).map(Vec::as_slice).unwrap_or(&[]);
        let (time, speedup, efficiency) = if client.is_empty() {
            (Vec::new(), Vec::new(), Vec::new())
        } else {
            let relative = speedups(client);
            (
                group_series(client),
                group_series(&relative),
                group_series(&efficiencies(&relative)),
            )
        };
        if !client.is_empty() {
            for (name, spec, series) in [
                ("client_dequeue_all", client_time_spec(&case), &time),
                ("client_speedup", speedup_spec(&case), &speedup),
                ("parallel_efficiency", efficiency_spec(&case), &efficiency),
            ] {
                written.push(write_chart(dir, name, &case, &spec, series)?);
            }
        }

        let worker: Vec<Series> = worker_obs
            .get(&case)
            .map(|obs| group_series(obs))
            .unwrap_or_default();
        if worker.is_empty() {
            warn!("No worker totals for case {}; worker graph skipped", case);
        } else {
            written.push(write_chart(dir, "worker_compute", &case, &worker_spec(&case), &worker)?);
        }

        if options.html_report {
            let path = dir.join(format!("report_{}.html", case));
            write_report(
                &path,
                &CaseCharts {
                    case: &case,
                    client_time: &time,
                    speedup: &speedup,
                    efficiency: &efficiency,
                    worker_compute: &worker,
                },
            )?;
            info!("Saved {:?}", path);
            written.push(path);
        }
    }

    Ok(written)
}

fn write_chart(dir: &Path, name: &str, case: &str, spec: &ChartSpec, series: &[Series]) -> Result<PathBuf> {
    let path = dir.join(format!("{}_{}.png", name, case));
    render_line_chart(&path, spec, series)?;
    info!("Saved {:?}", path);
    Ok(path)
}
