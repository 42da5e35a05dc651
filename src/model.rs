//! Record types produced by a single analysis run.
//!
//! Experiment parameters come from folder names (`n4`, `g16`, `r2`); when a
//! name does not follow the prefix-plus-digits convention the raw text is kept.

use std::{cmp::Ordering, fmt};

/// Parameter bound from a folder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Int(u64),
    Text(String),
}

impl ParamValue {
    /// Interprets a CSV cell: all-digit cells are integers, anything else is text.
    pub fn from_cell(cell: &str) -> Self {
        if !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = cell.parse::<u64>() {
                return ParamValue::Int(n);
            }
        }
        ParamValue::Text(cell.to_string())
    }
}

impl Ord for ParamValue {
    /// Integers sort numerically and ahead of any text value.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ParamValue::Int(a), ParamValue::Int(b)) => a.cmp(b),
            (ParamValue::Int(_), ParamValue::Text(_)) => Ordering::Less,
            (ParamValue::Text(_), ParamValue::Int(_)) => Ordering::Greater,
            (ParamValue::Text(a), ParamValue::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ParamValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Identifies one trial directory: `<difficulty>/<nodes>/<granularity>/<repeat>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrialKey {
    pub difficulty: String,
    pub num_nodes: ParamValue,
    pub granularity: ParamValue,
    pub trial_id: ParamValue,
}

impl fmt::Display for TrialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.difficulty, self.num_nodes, self.granularity, self.trial_id
        )
    }
}

/// Ordered `<prefix>_<tag>` -> value map.
///
/// Keeps the column position of the first occurrence; a repeated key
/// overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricMap {
    entries: Vec<(String, f64)>,
}

impl MetricMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: f64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn extend(&mut self, other: MetricMap) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One row of the per-trial summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub key: TrialKey,
    pub metrics: MetricMap,
}

/// Which worker log tag a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// A single payload computed by the worker.
    Payload,
    /// The worker's cumulative totals for the whole run.
    Total,
}

/// One row of the worker payload or worker total table.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerRecord {
    pub key: TrialKey,
    pub worker_id: u32,
    pub compute_time: f64,
    pub pixel_count: u64,
    pub iterations: u64,
}
