//! Interactive per-case report: the four charts in a 2x2 plotly grid.
//!
//! Layout:
//! - Top-left: client full-image time.
//! - Top-right: client speedup.
//! - Bottom-left: parallel efficiency.
//! - Bottom-right: worker total compute time.

use std::{fs, path::Path};

use plotly::{
    Plot, Scatter,
    common::Mode,
    layout::{Axis, GridPattern, Layout, LayoutGrid},
};

use crate::{
    error::{AnalysisError, Result},
    graphs::series::Series,
};

/// Series for one case, in grid order.
pub struct CaseCharts<'a> {
    pub case: &'a str,
    pub client_time: &'a [Series],
    pub speedup: &'a [Series],
    pub efficiency: &'a [Series],
    pub worker_compute: &'a [Series],
}

fn add_panel(plot: &mut Plot, series: &[Series], x_axis: &str, y_axis: &str, suffix: &str) {
    for s in series {
        let xs: Vec<f64> = s.points.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = s.points.iter().map(|(_, e)| e.mean).collect();
        plot.add_trace(
            Scatter::new(xs, ys)
                .name(&format!("g{} {}", s.granularity, suffix))
                .mode(Mode::LinesMarkers)
                .x_axis(x_axis)
                .y_axis(y_axis),
        );
    }
}

pub fn build_plot(charts: &CaseCharts<'_>) -> Plot {
    let mut plot = Plot::new();

    add_panel(&mut plot, charts.client_time, "x", "y", "time");
    add_panel(&mut plot, charts.speedup, "x2", "y2", "speedup");
    add_panel(&mut plot, charts.efficiency, "x3", "y3", "efficiency");
    add_panel(&mut plot, charts.worker_compute, "x4", "y4", "worker");

    let title = format!("Fractal benchmark - Case: {}", charts.case);
    let layout = Layout::new()
        .title(title.as_str())
        .height(1000)
        .width(1600)
        .show_legend(true)
        .grid(
            LayoutGrid::new()
                .rows(2)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .x_axis(Axis::new().title("Node count").domain(&[0.0, 0.48]))
        .y_axis(Axis::new().title("Time (seconds)").domain(&[0.55, 1.0]))
        .x_axis2(Axis::new().title("Node count").domain(&[0.52, 1.0]))
        .y_axis2(Axis::new().title("Speedup (relative to 1 node)").domain(&[0.55, 1.0]))
        .x_axis3(Axis::new().title("Node count").domain(&[0.0, 0.48]))
        .y_axis3(
            Axis::new()
                .title("Node Efficiency (Speedup / Nodes)")
                .domain(&[0.0, 0.45])
                .range(vec![0.0, 1.1]),
        )
        .x_axis4(Axis::new().title("Node count").domain(&[0.52, 1.0]))
        .y_axis4(Axis::new().title("Worker compute (seconds)").domain(&[0.0, 0.45]));

    plot.set_layout(layout);
    plot
}

pub fn write_report(path: &Path, charts: &CaseCharts<'_>) -> Result<()> {
    fs::write(path, build_plot(charts).to_html()).map_err(|e| AnalysisError::io(path, e))
}
