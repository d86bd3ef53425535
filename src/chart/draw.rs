use std::fmt::Write;

use nu_ansi_term::Color;

use super::dispatch::{CartesianChart, CartesianStyle, ChartView, PieChart};

const PLOT_HEIGHT: usize = 8;
const MISSING_LABEL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// Columns available to bars and plot areas, excluding labels.
    pub width: usize,
    pub color: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            width: 40,
            color: false,
        }
    }
}

impl std::fmt::Display for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&draw(self, DrawOptions::default()))
    }
}

/// Renders a chart view as terminal text.
pub fn draw(view: &ChartView, opts: DrawOptions) -> String {
    match view {
        ChartView::Cartesian(chart) => match chart.style {
            CartesianStyle::Bar => draw_bars(chart, opts),
            CartesianStyle::Line => draw_plot(chart, opts, true),
            CartesianStyle::Scatter => draw_plot(chart, opts, false),
        },
        ChartView::Pie(chart) => draw_pie(chart, opts),
        ChartView::Unsupported { .. } => view.notice().unwrap_or_default(),
    }
}

fn paint(text: &str, hex: &str, opts: DrawOptions) -> String {
    match (opts.color, rgb(hex)) {
        (true, Some((r, g, b))) => Color::Rgb(r, g, b).paint(text).to_string(),
        _ => text.to_string(),
    }
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn label_width<'a>(labels: impl Iterator<Item = Option<&'a str>>) -> usize {
    labels
        .map(|l| l.unwrap_or(MISSING_LABEL).chars().count())
        .max()
        .unwrap_or(0)
}

fn draw_bars(chart: &CartesianChart, opts: DrawOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} by {}", chart.y_key, chart.x_key);

    let max = chart
        .points
        .iter()
        .filter_map(|p| p.value)
        .fold(0.0_f64, f64::max);
    let pad = label_width(chart.points.iter().map(|p| p.label.as_deref()));

    for point in &chart.points {
        let label = point.label.as_deref().unwrap_or(MISSING_LABEL);
        let _ = write!(out, "{label:<pad$} │");
        if let Some(value) = point.value {
            let len = if max > 0.0 && value > 0.0 {
                ((value / max) * opts.width as f64).round() as usize
            } else {
                0
            };
            let bar = "█".repeat(len);
            let _ = write!(out, "{} {}", paint(&bar, chart.color, opts), format_value(value));
        }
        out.push('\n');
    }
    out
}

fn draw_plot(chart: &CartesianChart, opts: DrawOptions, connect: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} by {}", chart.y_key, chart.x_key);

    let values: Vec<f64> = chart.points.iter().filter_map(|p| p.value).collect();
    if values.is_empty() {
        out.push_str("(no plottable values)\n");
        return out;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let n = chart.points.len();
    let step = if n > 1 {
        (opts.width.max(n) - 1) / (n - 1)
    } else {
        0
    };
    let cols = step * n.saturating_sub(1) + 1;
    let mut grid = vec![vec![' '; cols]; PLOT_HEIGHT];
    let row_of = |v: f64| {
        let scaled = ((v - min) / span * (PLOT_HEIGHT - 1) as f64).round() as usize;
        PLOT_HEIGHT - 1 - scaled.min(PLOT_HEIGHT - 1)
    };

    let mut prev: Option<(usize, usize)> = None;
    for (i, point) in chart.points.iter().enumerate() {
        let col = i * step;
        let Some(value) = point.value else {
            prev = None;
            continue;
        };
        let row = row_of(value);
        if let (true, Some((pcol, prow))) = (connect, prev) {
            for c in pcol + 1..col {
                let t = (c - pcol) as f64 / (col - pcol) as f64;
                let r = (prow as f64 + (row as f64 - prow as f64) * t).round() as usize;
                grid[r][c] = '·';
            }
        }
        grid[row][col] = '●';
        prev = Some((col, row));
    }

    let top = format_value(max);
    let bottom = format_value(min);
    let axis = top.len().max(bottom.len());
    for (r, line) in grid.iter().enumerate() {
        let tick = match r {
            0 => top.as_str(),
            r if r == PLOT_HEIGHT - 1 => bottom.as_str(),
            _ => "",
        };
        let line: String = line.iter().collect();
        let _ = writeln!(
            out,
            "{tick:>axis$} ┤{}",
            paint(line.trim_end(), chart.color, opts)
        );
    }
    let _ = writeln!(out, "{:>axis$} └{}", "", "─".repeat(cols));

    for (i, point) in chart.points.iter().enumerate() {
        let label = point.label.as_deref().unwrap_or(MISSING_LABEL);
        let value = point.value.map(format_value).unwrap_or_else(|| MISSING_LABEL.to_string());
        let _ = writeln!(out, "  {}. {label} = {value}", i + 1);
    }
    out
}

fn draw_pie(chart: &PieChart, opts: DrawOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} share by {}", chart.value_key, chart.label_key);

    let total = chart.total();
    let pad = label_width(chart.slices.iter().map(|s| s.label.as_deref()));
    for slice in &chart.slices {
        let Some(value) = slice.value.filter(|v| *v > 0.0) else {
            continue;
        };
        let label = slice.label.as_deref().unwrap_or(MISSING_LABEL);
        let share = value / total;
        let len = ((share * opts.width as f64).round() as usize).max(1);
        let _ = writeln!(
            out,
            "{} {label:<pad$} {:>6.1}% {} ({})",
            paint("■", slice.color, opts),
            share * 100.0,
            paint(&"▇".repeat(len), slice.color, opts),
            format_value(value),
        );
    }
    out
}
