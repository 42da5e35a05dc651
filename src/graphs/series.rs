//! Series derived from the CSV tables: raw time, speedup and efficiency per granularity.
//!
//! Speedup for a row is the 1-node mean for its granularity divided by the
//! row's own value; efficiency divides that by the node count.

use std::collections::BTreeMap;

use log::warn;

use crate::{
    model::ParamValue,
    utils::stats::{Estimate, estimate, mean},
};

/// One trial value for a given granularity and node count.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub granularity: ParamValue,
    pub num_nodes: f64,
    pub value: f64,
}

/// A line on a chart: per node count, the aggregate over trials.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub granularity: ParamValue,
    pub points: Vec<(f64, Estimate)>,
}

/// Groups observations by granularity and node count, sorted on both.
pub fn group_series(observations: &[Observation]) -> Vec<Series> {
    let mut groups: BTreeMap<&ParamValue, Vec<(f64, f64)>> = BTreeMap::new();
    for obs in observations {
        groups
            .entry(&obs.granularity)
            .or_default()
            .push((obs.num_nodes, obs.value));
    }

    groups
        .into_iter()
        .map(|(granularity, mut samples)| {
            samples.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut points = Vec::new();
            for chunk in samples.chunk_by(|a, b| a.0 == b.0) {
                let values: Vec<f64> = chunk.iter().map(|(_, v)| *v).collect();
                if let Some(e) = estimate(&values) {
                    points.push((chunk[0].0, e));
                }
            }
            Series {
                granularity: granularity.clone(),
                points,
            }
        })
        .collect()
}

/// Mean value at a single node, per granularity.
pub fn baselines(observations: &[Observation]) -> BTreeMap<ParamValue, f64> {
    let mut single_node: BTreeMap<ParamValue, Vec<f64>> = BTreeMap::new();
    for obs in observations.iter().filter(|o| o.num_nodes == 1.0) {
        single_node
            .entry(obs.granularity.clone())
            .or_default()
            .push(obs.value);
    }
    single_node
        .into_iter()
        .filter_map(|(g, values)| mean(&values).map(|m| (g, m)))
        .collect()
}

/// Replaces each value by `baseline / value`.
///
/// Rows whose granularity has no 1-node baseline, or whose value is not
/// positive, are dropped and logged.
pub fn speedups(observations: &[Observation]) -> Vec<Observation> {
    let base = baselines(observations);
    let mut dropped = 0usize;

    let out: Vec<Observation> = observations
        .iter()
        .filter_map(|obs| {
            let baseline = base.get(&obs.granularity);
            match baseline {
                Some(b) if obs.value > 0.0 => Some(Observation {
                    value: b / obs.value,
                    ..obs.clone()
                }),
                _ => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        warn!("{} rows without a 1-node baseline left out of speedup", dropped);
    }
    out
}

/// Speedup divided by node count, from the output of [`speedups`].
///
/// Rows without a positive node count are dropped and logged.
pub fn efficiencies(speedups: &[Observation]) -> Vec<Observation> {
    let out: Vec<Observation> = speedups
        .iter()
        .filter(|obs| obs.num_nodes > 0.0)
        .map(|obs| Observation {
            value: obs.value / obs.num_nodes,
            ..obs.clone()
        })
        .collect();

    let dropped = speedups.len() - out.len();
    if dropped > 0 {
        warn!("{} rows without a positive node count left out of efficiency", dropped);
    }
    out
}
