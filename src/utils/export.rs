//! CSV export for the summary and worker tables.
//!
//! Floats are written with a fixed number of decimals; missing metric cells
//! are left empty. A table without rows still gets its header.

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use log::info;

use crate::{
    collect::Results,
    config::{SUMMARY_CSV, WORKER_PAYLOADS_CSV, WORKER_TOTALS_CSV},
    error::{AnalysisError, Result},
    model::{TrialKey, TrialSummary, WorkerRecord},
};

const KEY_COLUMNS: [&str; 4] = ["difficulty", "num_nodes", "granularity", "trial_id"];
const WORKER_COLUMNS: [&str; 4] = ["worker_id", "compute_time", "pixel_count", "iterations"];

fn key_cells(key: &TrialKey) -> [String; 4] {
    [
        key.difficulty.clone(),
        key.num_nodes.to_string(),
        key.granularity.to_string(),
        key.trial_id.to_string(),
    ]
}

fn summary_cells(summary: &TrialSummary, columns: &[String], precision: usize) -> Vec<String> {
    let mut cells: Vec<String> = key_cells(&summary.key).into();
    cells.extend(columns.iter().map(|c| {
        summary
            .metrics
            .get(c)
            .map(|v| format!("{:.*}", precision, v))
            .unwrap_or_default()
    }));
    cells
}

/// Writes `experiment_results.csv`-style output: key columns then every metric column.
pub fn write_summary_csv(path: &Path, results: &Results, precision: usize) -> Result<usize> {
    let columns = results.metric_columns();
    let mut writer = WriterBuilder::new().from_path(path)?;

    let header: Vec<&str> = KEY_COLUMNS
        .iter()
        .copied()
        .chain(columns.iter().map(String::as_str))
        .collect();
    writer.write_record(&header)?;

    for summary in &results.summaries {
        writer.write_record(summary_cells(summary, &columns, precision))?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;

    Ok(results.summaries.len())
}

/// Writes one worker table (payloads or totals).
pub fn write_worker_csv(path: &Path, rows: &[WorkerRecord], precision: usize) -> Result<usize> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(KEY_COLUMNS.iter().chain(WORKER_COLUMNS.iter()))?;

    for row in rows {
        let mut cells: Vec<String> = key_cells(&row.key).into();
        cells.push(row.worker_id.to_string());
        cells.push(format!("{:.*}", precision, row.compute_time));
        cells.push(row.pixel_count.to_string());
        cells.push(row.iterations.to_string());
        writer.write_record(&cells)?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;

    Ok(rows.len())
}

/// Paths and row counts of the files written by [`export_all`].
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub written: Vec<(PathBuf, usize)>,
}

/// Writes all three tables into `output_dir`, creating it if needed.
pub fn export_all(output_dir: &Path, results: &Results, precision: usize) -> Result<ExportReport> {
    create_dir_all(output_dir).map_err(|e| AnalysisError::io(output_dir, e))?;

    let summary_path = output_dir.join(SUMMARY_CSV);
    let payloads_path = output_dir.join(WORKER_PAYLOADS_CSV);
    let totals_path = output_dir.join(WORKER_TOTALS_CSV);

    let written = vec![
        (summary_path.clone(), write_summary_csv(&summary_path, results, precision)?),
        (payloads_path.clone(), write_worker_csv(&payloads_path, &results.worker_payloads, precision)?),
        (totals_path.clone(), write_worker_csv(&totals_path, &results.worker_totals, precision)?),
    ];
    for (path, rows) in &written {
        info!("Wrote {} rows to {:?}", rows, path);
    }

    Ok(ExportReport { written })
}

/// Formats the first `limit` summary rows as an aligned text table.
pub fn format_preview(results: &Results, limit: usize, precision: usize) -> String {
    let columns = results.metric_columns();
    let header: Vec<String> = KEY_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().cloned())
        .collect();
    let rows: Vec<Vec<String>> = results
        .summaries
        .iter()
        .take(limit)
        .map(|s| summary_cells(s, &columns, precision))
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = render(&header);
    out.push('\n');
    out.push_str(&"=".repeat(out.trim_end().len()));
    for row in &rows {
        out.push('\n');
        out.push_str(&render(row));
    }
    out
}
