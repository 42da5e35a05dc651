//! PNG line charts: one line per granularity, mean with a shaded 95% band.

use std::{error::Error, path::Path};

use plotters::{prelude::*, series::DashedLineSeries};

use crate::{
    config::FIGURE_SIZE_PX,
    error::{AnalysisError, Result},
    graphs::series::Series,
};

/// matplotlib's tab10 cycle.
const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Titles and axis settings for one chart.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Fixed y range; derived from the data when `None`.
    pub y_range: Option<(f64, f64)>,
    /// Horizontal dashed reference line.
    pub reference_y: Option<f64>,
}

pub fn palette(index: usize) -> RGBColor {
    TAB10[index % TAB10.len()]
}

/// Renders `series` to a PNG at `path`.
pub fn render_line_chart(path: &Path, spec: &ChartSpec, series: &[Series]) -> Result<()> {
    draw(path, spec, series)
        .map_err(|e| AnalysisError::Plot(format!("{}: {}", path.display(), e)))
}

fn draw(path: &Path, spec: &ChartSpec, series: &[Series]) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, FIGURE_SIZE_PX).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = x_bounds(series);
    let (y_min, y_max) = spec
        .y_range
        .unwrap_or_else(|| y_bounds(series, spec.reference_y));

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .label_style(("sans-serif", 24))
        .axis_desc_style(("sans-serif", 27))
        .draw()?;

    if let Some(y) = spec.reference_y {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_min, y), (x_max, y)],
            12,
            8,
            RGBColor(128, 128, 128).stroke_width(2),
        ))?;
    }

    for (i, s) in series.iter().enumerate() {
        let color = palette(i);

        if s.points.len() > 1 && s.points.iter().any(|(_, e)| e.upper > e.lower) {
            let mut band: Vec<(f64, f64)> = s.points.iter().map(|(x, e)| (*x, e.upper)).collect();
            band.extend(s.points.iter().rev().map(|(x, e)| (*x, e.lower)));
            let band = clamp_y(&band, spec.y_range);
            chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.2).filled())))?;
        }

        let means: Vec<(f64, f64)> = s.points.iter().map(|(x, e)| (*x, e.mean)).collect();
        chart
            .draw_series(LineSeries::new(clamp_y(&means, spec.y_range), color.stroke_width(3)))?
            .label(format!("Granularity {}", s.granularity))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3)));
        chart.draw_series(
            means
                .iter()
                .filter(|(_, y)| in_range(*y, spec.y_range))
                .map(|&p| Circle::new(p, 6, color.filled())),
        )?;
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 21))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Pins y values into a fixed range so nothing is drawn over the margins.
fn clamp_y(points: &[(f64, f64)], range: Option<(f64, f64)>) -> Vec<(f64, f64)> {
    match range {
        Some((lo, hi)) => points.iter().map(|(x, y)| (*x, y.clamp(lo, hi))).collect(),
        None => points.to_vec(),
    }
}

fn in_range(y: f64, range: Option<(f64, f64)>) -> bool {
    range.is_none_or(|(lo, hi)| (lo..=hi).contains(&y))
}

fn x_bounds(series: &[Series]) -> (f64, f64) {
    let xs = series.iter().flat_map(|s| s.points.iter().map(|(x, _)| *x));
    widen(bounds(xs).unwrap_or((0.0, 1.0)), 0.5)
}

/// Data extent padded by 5%, always including the reference line.
fn y_bounds(series: &[Series], reference: Option<f64>) -> (f64, f64) {
    let ys = series
        .iter()
        .flat_map(|s| s.points.iter().flat_map(|(_, e)| [e.lower, e.upper]))
        .chain(reference);
    let (lo, hi) = widen(bounds(ys).unwrap_or((0.0, 1.0)), 0.5);
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn widen((lo, hi): (f64, f64), by: f64) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - by, hi + by) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::ParamValue, utils::stats::estimate};

    fn series(points: &[(f64, f64)]) -> Series {
        Series {
            granularity: ParamValue::Int(8),
            points: points
                .iter()
                .map(|(x, v)| (*x, estimate(&[*v]).unwrap()))
                .collect(),
        }
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        let s = series(&[(1.0, 2.0)]);
        assert_eq!(x_bounds(&[s.clone()]), (0.5, 1.5));
        let (lo, hi) = y_bounds(&[s], None);
        assert!(lo < 2.0 && hi > 2.0);
    }

    #[test]
    fn reference_line_stays_in_range() {
        let s = series(&[(1.0, 3.0), (2.0, 5.0)]);
        let (lo, hi) = y_bounds(&[s], Some(1.0));
        assert!(lo <= 1.0);
        assert!(hi >= 5.0);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette(0).rgb(), palette(10).rgb());
    }

    #[test]
    fn fixed_range_pins_out_of_range_values() {
        let pts = [(1.0, 1.0), (2.0, 3.0), (4.0, -0.2)];
        let clamped = clamp_y(&pts, Some((0.0, 1.1)));
        assert_eq!(clamped, vec![(1.0, 1.0), (2.0, 1.1), (4.0, 0.0)]);
        assert_eq!(clamp_y(&pts, None), pts.to_vec());

        assert!(in_range(1.0, Some((0.0, 1.1))));
        assert!(!in_range(3.0, Some((0.0, 1.1))));
        assert!(in_range(3.0, None));
    }
}
