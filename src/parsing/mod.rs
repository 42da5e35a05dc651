pub mod log_line;
pub mod worker;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::{AnalysisError, Result};

pub use log_line::{parse_log_file, parse_log_line};
pub use worker::{parse_worker_line, parse_worker_logs, worker_id_from_file_name, WorkerSample};

/// Reads a log line by line; invalid UTF-8 is replaced rather than failing the file.
pub(crate) fn read_lines_lossy(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    BufReader::new(file)
        .split(b'\n')
        .map(|raw| {
            raw.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|e| AnalysisError::io(path, e))
        })
        .collect()
}
