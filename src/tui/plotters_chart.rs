//! Plotters-powered monthly variation chart widget for Ratatui.
//!
//! Plotters gives us axis + label rendering for free; its output is drawn into
//! the Ratatui buffer using `plotters-ratatui-backend`.
//!
//! The x axis is the month index (`0..months.len()`), labelled with `YYYY-MM`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{ChartKind, MonthKey};

/// One plotted fund: values aligned with the chart's month axis.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub color: RGBColor,
    pub values: Vec<Option<f64>>,
}

/// A render-only chart description; all series and bounds are computed
/// outside the render call.
pub struct VariationChart<'a> {
    pub months: &'a [MonthKey],
    pub series: &'a [ChartSeries],
    pub kind: ChartKind,
    /// Y bounds in percent.
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for VariationChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.months.len();
        if n == 0 {
            return;
        }
        let x0 = -0.5_f64;
        let x1 = n as f64 - 0.5;
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let months = self.months;
        let series = self.series;
        let kind = self.kind;
        let month_label = move |v: &f64| {
            let idx = v.round();
            if idx < 0.0 || (v - idx).abs() > 0.25 {
                return String::new();
            }
            months.get(idx as usize).map(|m| m.to_string()).unwrap_or_default()
        };

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n.min(6))
                .y_labels(5)
                .x_label_formatter(&month_label)
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Zero reference line.
            if y0 < 0.0 && 0.0 < y1 {
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &RGBColor(90, 90, 90)))?;
            }

            let count = series.len().max(1);
            for (k, s) in series.iter().enumerate() {
                match kind {
                    ChartKind::Line => {
                        for segment in line_segments(&s.values) {
                            chart.draw_series(LineSeries::new(segment, &s.color))?;
                        }
                        // Markers keep lone months (no neighbour to join) visible.
                        chart.draw_series(
                            s.values
                                .iter()
                                .enumerate()
                                .filter_map(|(i, v)| v.map(|v| Pixel::new((i as f64, v), s.color))),
                        )?;
                    }
                    ChartKind::Bar => {
                        let style = ShapeStyle::from(&s.color).filled();
                        chart.draw_series(s.values.iter().enumerate().filter_map(|(i, v)| {
                            let v = (*v)?;
                            let (left, right) = bar_span(i, k, count);
                            Some(Rectangle::new([(left, 0.0), (right, v)], style))
                        }))?;
                    }
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Split a series into runs of consecutive months that all have a value.
///
/// A missing month breaks the line instead of being bridged.
pub fn line_segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut cur: Vec<(f64, f64)> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(v) => cur.push((i as f64, *v)),
            None => {
                if cur.len() > 1 {
                    out.push(std::mem::take(&mut cur));
                } else {
                    cur.clear();
                }
            }
        }
    }
    if cur.len() > 1 {
        out.push(cur);
    }
    out
}

/// Horizontal extent of bar `series_idx` (of `series_count`) in month slot `i`.
pub fn bar_span(i: usize, series_idx: usize, series_count: usize) -> (f64, f64) {
    let slot = 0.8 / series_count.max(1) as f64;
    let left = i as f64 - 0.4 + slot * series_idx as f64;
    (left, left + slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_lines() {
        let segs = line_segments(&[Some(1.0), Some(2.0), None, Some(3.0), None, Some(4.0), Some(5.0)]);
        assert_eq!(segs, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(5.0, 4.0), (6.0, 5.0)]]);
    }

    #[test]
    fn bars_share_the_slot() {
        let (l0, r0) = bar_span(2, 0, 2);
        let (l1, r1) = bar_span(2, 1, 2);
        assert!((l0 - 1.6).abs() < 1e-12);
        assert!((r0 - l1).abs() < 1e-12);
        assert!((r1 - 2.4).abs() < 1e-12);
    }
}
