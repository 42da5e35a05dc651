//! Per-point aggregates for the graphs: mean and a Student-t 95% interval.

use average::Variance;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Mean of a group of trial values with its 95% confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Computes mean and 95% CI; a single sample gets a zero-width interval.
pub fn estimate(values: &[f64]) -> Option<Estimate> {
    if values.is_empty() {
        return None;
    }

    let var: Variance = values.iter().copied().collect();
    let mean = var.mean();
    let count = values.len();

    let half_width = if count < 2 {
        0.0
    } else {
        let t = StudentsT::new(0.0, 1.0, (count - 1) as f64)
            .map(|dist| dist.inverse_cdf(0.975))
            .unwrap_or(0.0);
        t * var.error()
    };

    Some(Estimate {
        mean,
        lower: mean - half_width,
        upper: mean + half_width,
        count,
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    estimate(values).map(|e| e.mean)
}
