//! Worker logs: one `worker_<id>.txt` per worker, lines of the form
//! `[WORKER_<n>_PAYLOAD]: <seconds>, <pixels>, <iterations>` and the same with `_TOTAL`.

use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

use log::{debug, warn};

use crate::{
    error::{AnalysisError, Result},
    model::{TrialKey, WorkerPhase, WorkerRecord},
    parsing::read_lines_lossy,
};

static WORKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(WORKER_\d+_(PAYLOAD|TOTAL))\]:\s+([0-9.]+),\s+([0-9]+),\s+([0-9]+)")
        .expect("static regex")
});

static WORKER_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^worker_(\d+)\.txt$").expect("static regex"));

/// Values carried by a single worker log line.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerSample {
    pub phase: WorkerPhase,
    pub compute_time: f64,
    pub pixel_count: u64,
    pub iterations: u64,
}

pub fn parse_worker_line(line: &str) -> Option<WorkerSample> {
    let caps = WORKER_LINE.captures(line.trim())?;
    let phase = match &caps[2] {
        "PAYLOAD" => WorkerPhase::Payload,
        _ => WorkerPhase::Total,
    };
    let compute_time = caps[3].parse::<f64>().ok()?;
    let pixel_count = caps[4].parse::<u64>().ok()?;
    let iterations = caps[5].parse::<u64>().ok()?;

    Some(WorkerSample {
        phase,
        compute_time,
        pixel_count,
        iterations,
    })
}

/// `worker_7.txt` -> 7
pub fn worker_id_from_file_name(name: &str) -> Option<u32> {
    WORKER_FILE.captures(name)?[1].parse().ok()
}

/// Collects payload and total rows from every worker log in a trial directory.
///
/// The worker id is taken from the file name, not from the line tag. Files
/// are read in name order.
pub fn parse_worker_logs(
    trial_dir: &Path,
    key: &TrialKey,
) -> Result<(Vec<WorkerRecord>, Vec<WorkerRecord>)> {
    let mut payloads = Vec::new();
    let mut totals = Vec::new();

    let mut files = Vec::new();
    for entry in fs::read_dir(trial_dir).map_err(|e| AnalysisError::io(trial_dir, e))? {
        let entry = entry.map_err(|e| AnalysisError::io(trial_dir, e))?;
        let Ok(name) = entry.file_name().into_string() else { continue };
        if name.starts_with("worker_") && name.ends_with(".txt") {
            files.push((name, entry.path()));
        }
    }
    files.sort();

    for (name, path) in files {
        if !path.is_file() {
            continue;
        }
        let Some(worker_id) = worker_id_from_file_name(&name) else {
            warn!("Skipping {}: no numeric worker id", path.display());
            continue;
        };

        let mut parsed = 0usize;
        for line in read_lines_lossy(&path)? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(sample) = parse_worker_line(&line) else { continue };

            let record = WorkerRecord {
                key: key.clone(),
                worker_id,
                compute_time: sample.compute_time,
                pixel_count: sample.pixel_count,
                iterations: sample.iterations,
            };
            match sample.phase {
                WorkerPhase::Payload => payloads.push(record),
                WorkerPhase::Total => totals.push(record),
            }
            parsed += 1;
        }
        debug!("{}: {} worker lines", path.display(), parsed);
    }

    Ok((payloads, totals))
}
