//! Trial discovery: `<difficulty>/n<nodes>/g<granularity>/r<repeat>` under the results root.

use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::{
    error::{AnalysisError, Result},
    model::{ParamValue, TrialKey},
};

const TRIAL_DEPTH: usize = 4;

/// A trial directory and the parameters bound from its path.
#[derive(Debug, Clone)]
pub struct TrialDir {
    pub path: PathBuf,
    /// Path relative to the results root, as shown in progress output.
    pub label: String,
    pub key: TrialKey,
}

/// `n16` with prefix `n` -> `Int(16)`; anything else keeps the raw folder name.
pub fn parse_param(name: &str, prefix: char) -> ParamValue {
    if let Some(digits) = name.strip_prefix(prefix) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u64>() {
                return ParamValue::Int(n);
            }
        }
    }
    ParamValue::Text(name.to_string())
}

/// Finds every directory exactly four levels below `root`.
///
/// Files at any level are ignored. Discovery order is by file name; callers
/// sort the resulting tables themselves.
pub fn discover_trials(root: &Path) -> Result<Vec<TrialDir>> {
    if !root.is_dir() {
        // Surface the underlying I/O error (missing, not a directory, permissions).
        std::fs::read_dir(root).map_err(|e| AnalysisError::io(root, e))?;
    }

    let mut trials = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(TRIAL_DEPTH)
        .max_depth(TRIAL_DEPTH)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else { continue };
        let names: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let [difficulty, nodes, granularity, repeat] = names.as_slice() else {
            continue;
        };

        trials.push(TrialDir {
            path: entry.path().to_path_buf(),
            label: names.join("/"),
            key: TrialKey {
                difficulty: difficulty.clone(),
                num_nodes: parse_param(nodes, 'n'),
                granularity: parse_param(granularity, 'g'),
                trial_id: parse_param(repeat, 'r'),
            },
        });
    }

    Ok(trials)
}
