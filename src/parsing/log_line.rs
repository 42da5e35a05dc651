//! Client/coordinator log lines: `[TAG]: <seconds>`.
//!
//! Lines that don't open with a bracketed tag are ignored; anything after the
//! numeric value is ignored too.

use regex::Regex;
use std::{path::Path, sync::LazyLock};

use log::warn;

use crate::{
    error::Result,
    model::MetricMap,
    parsing::read_lines_lossy,
};

static TAGGED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]:\s+([0-9.]+)").expect("static regex"));

/// Splits a tagged log line into `(tag, value)`.
pub fn parse_log_line(line: &str) -> Option<(&str, f64)> {
    let caps = TAGGED_VALUE.captures(line.trim())?;
    let tag = caps.get(1)?.as_str();
    let raw = caps.get(2)?.as_str();
    match raw.parse::<f64>() {
        Ok(value) => Some((tag, value)),
        Err(_) => {
            warn!("Ignoring [{}]: malformed value '{}'", tag, raw);
            None
        }
    }
}

/// Reads every tagged line of a log into `<prefix>_<lowercase tag>` metrics.
///
/// A missing file yields an empty map.
pub fn parse_log_file(path: &Path, prefix: &str) -> Result<MetricMap> {
    let mut metrics = MetricMap::new();
    if !path.is_file() {
        return Ok(metrics);
    }

    for line in read_lines_lossy(path)? {
        if let Some((tag, value)) = parse_log_line(&line) {
            metrics.insert(format!("{}_{}", prefix, tag.to_lowercase()), value);
        }
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_tag_and_value() {
        assert_eq!(parse_log_line("[DEQUEUE_ALL]: 1.250000"), Some(("DEQUEUE_ALL", 1.25)));
        assert_eq!(parse_log_line("   [CONNECT]:\t0.5 s  "), Some(("CONNECT", 0.5)));
    }

    #[test]
    fn rejects_untagged_or_unspaced_lines() {
        assert_eq!(parse_log_line("connecting to coordinator"), None);
        assert_eq!(parse_log_line("[TAG]:0.5"), None);
        assert_eq!(parse_log_line("[TAG]: -0.5"), None);
        assert_eq!(parse_log_line("info [TAG]: 0.5"), None);
    }

    #[test]
    fn malformed_number_is_skipped() {
        assert_eq!(parse_log_line("[TAG]: 1.2.3"), None);
    }

    #[test]
    fn file_metrics_are_prefixed_and_lowercased() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[SETUP]: 0.1").unwrap();
        writeln!(file, "noise").unwrap();
        writeln!(file, "[DEQUEUE_ALL]: 2.0").unwrap();
        writeln!(file, "[SETUP]: 0.3").unwrap();

        let m = parse_log_file(file.path(), "client").unwrap();
        let keys: Vec<_> = m.keys().collect();
        assert_eq!(keys, vec!["client_setup", "client_dequeue_all"]);
        assert_eq!(m.get("client_setup"), Some(0.3));
    }

    #[test]
    fn corrupted_bytes_only_lose_their_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[SETUP]: 0.1\n\xc3\x28 garbage\n[DEQUEUE_ALL]: 2.0\r\n").unwrap();

        let m = parse_log_file(file.path(), "client").unwrap();
        assert_eq!(m.get("client_setup"), Some(0.1));
        assert_eq!(m.get("client_dequeue_all"), Some(2.0));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let m = parse_log_file(&dir.path().join("absent.txt"), "coord").unwrap();
        assert!(m.is_empty());
    }
}
