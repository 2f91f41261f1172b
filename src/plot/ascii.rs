//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - monthly values: `o` (single fund) or `1`..`4` (comparison)
//! - line mode: `-` segments between consecutive months that both have a value
//! - bar mode: vertical runs from the zero line
//! - zero line: `.`

use crate::compare::ComparisonChart;
use crate::domain::{ChartKind, MonthKey, MonthlyVariation};

/// Render a single fund's monthly variations.
pub fn render_variation_plot(
    variations: &[MonthlyVariation],
    kind: ChartKind,
    width: usize,
    height: usize,
) -> String {
    let months: Vec<MonthKey> = variations.iter().map(|v| v.month).collect();
    let values: Vec<Option<f64>> = variations.iter().map(|v| Some(v.variation_percent)).collect();
    render_plot(&months, &[('o', values)], kind, width, height)
}

/// Render a comparison chart with one digit marker per fund and a legend.
pub fn render_comparison_plot(chart: &ComparisonChart, kind: ChartKind, width: usize, height: usize) -> String {
    let series: Vec<(char, Vec<Option<f64>>)> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| (marker(i), s.values.clone()))
        .collect();

    let mut out = render_plot(&chart.months, &series, kind, width, height);
    for (i, s) in chart.series.iter().enumerate() {
        out.push_str(&format!("{} = {}\n", marker(i), s.label));
    }
    out
}

fn marker(i: usize) -> char {
    char::from_digit((i % 9) as u32 + 1, 10).unwrap_or('*')
}

fn render_plot(
    months: &[MonthKey],
    series: &[(char, Vec<Option<f64>>)],
    kind: ChartKind,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(series, kind).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Zero line first so series overlay it.
    if y_min <= 0.0 && 0.0 <= y_max {
        let zero = map_y(0.0, y_min, y_max, height);
        for cell in grid[zero].iter_mut() {
            *cell = '.';
        }
    }

    let n = months.len();
    for (k, (ch, values)) in series.iter().enumerate() {
        match kind {
            ChartKind::Line => draw_series_line(&mut grid, values, *ch, n, y_min, y_max),
            ChartKind::Bar => draw_series_bars(&mut grid, values, *ch, k, series.len(), n, y_min, y_max),
        }
    }

    // Build final string. We include a small header with ranges.
    let first = months.first().map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
    let last = months.last().map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: months=[{first}, {last}] | y=[{y_min:.2}, {y_max:.2}]%\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn draw_series_line(grid: &mut [Vec<char>], values: &[Option<f64>], ch: char, n: usize, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    // Segments only join neighbouring months that both have a value.
    for (i, pair) in values.windows(2).enumerate() {
        if let [Some(a), Some(b)] = pair {
            let x0 = slot_x(i, n, width);
            let x1 = slot_x(i + 1, n, width);
            draw_line(
                grid,
                x0,
                map_y(*a, y_min, y_max, height),
                x1,
                map_y(*b, y_min, y_max, height),
                '-',
            );
        }
    }

    for (i, v) in values.iter().enumerate() {
        if let Some(v) = v {
            grid[map_y(*v, y_min, y_max, height)][slot_x(i, n, width)] = ch;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_series_bars(
    grid: &mut [Vec<char>],
    values: &[Option<f64>],
    ch: char,
    series_idx: usize,
    series_count: usize,
    n: usize,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();
    let base = map_y(0.0_f64.clamp(y_min, y_max), y_min, y_max, height);
    let offset = series_idx as isize - (series_count as isize - 1) / 2;

    for (i, v) in values.iter().enumerate() {
        let Some(v) = v else { continue };
        let x = (slot_x(i, n, width) as isize + offset).clamp(0, width as isize - 1) as usize;
        let y = map_y(*v, y_min, y_max, height);
        for row in grid.iter_mut().take(base.max(y) + 1).skip(base.min(y)) {
            row[x] = ch;
        }
    }
}

fn y_range(series: &[(char, Vec<Option<f64>>)], kind: ChartKind) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for (_, values) in series {
        for v in values.iter().flatten() {
            min_y = min_y.min(*v);
            max_y = max_y.max(*v);
        }
    }
    if kind == ChartKind::Bar {
        min_y = min_y.min(0.0);
        max_y = max_y.max(0.0);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Column of month slot `i` out of `n`.
fn slot_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return width / 2;
    }
    map_x(i as f64, 0.0, (n - 1) as f64, width)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only blank or zero-line cells are overwritten.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if *cell == ' ' || *cell == '.' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonSeries;

    fn worked_example() -> Vec<MonthlyVariation> {
        vec![
            MonthlyVariation {
                month: MonthKey::new(2024, 1),
                variation_percent: 10.0,
                fund_label: "f".to_string(),
            },
            MonthlyVariation {
                month: MonthKey::new(2024, 2),
                variation_percent: -10.0,
                fund_label: "f".to_string(),
            },
        ]
    }

    #[test]
    fn line_plot_golden_snapshot_small() {
        let txt = render_variation_plot(&worked_example(), ChartKind::Line, 10, 5);
        let expected = concat!(
            "Plot: months=[2024-01, 2024-02] | y=[-11.00, 11.00]%\n",
            "o-        \n",
            "  --      \n",
            "....--....\n",
            "      --  \n",
            "        -o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bar_plot_golden_snapshot_small() {
        let txt = render_variation_plot(&worked_example(), ChartKind::Bar, 10, 5);
        let expected = concat!(
            "Plot: months=[2024-01, 2024-02] | y=[-11.00, 11.00]%\n",
            "o         \n",
            "o         \n",
            "o........o\n",
            "         o\n",
            "         o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn comparison_plot_has_markers_and_legend() {
        let chart = ComparisonChart {
            months: vec![MonthKey::new(2024, 1), MonthKey::new(2024, 2), MonthKey::new(2024, 3)],
            series: vec![
                ComparisonSeries {
                    label: "Risky Norris".to_string(),
                    values: vec![Some(2.0), None, Some(1.0)],
                },
                ComparisonSeries {
                    label: "Moderate Pitt".to_string(),
                    values: vec![None, Some(-1.0), Some(0.5)],
                },
            ],
        };
        let txt = render_comparison_plot(&chart, ChartKind::Line, 20, 8);
        assert!(txt.starts_with("Plot: months=[2024-01, 2024-03]"));
        assert!(txt.contains('1') && txt.contains('2'));
        assert!(txt.ends_with("1 = Risky Norris\n2 = Moderate Pitt\n"));
        // The first fund has a gap in February, so no segment is drawn for it.
        let body: Vec<&str> = txt.lines().skip(1).take(8).collect();
        assert_eq!(body[0].find('1'), Some(0));
    }

    #[test]
    fn flat_single_month_does_not_panic() {
        let one = vec![MonthlyVariation {
            month: MonthKey::new(2024, 1),
            variation_percent: 0.0,
            fund_label: "f".to_string(),
        }];
        let txt = render_variation_plot(&one, ChartKind::Line, 10, 5);
        assert_eq!(txt.lines().count(), 6);
        assert!(txt.contains('o'));
    }
}
