use serde_json::Value;

use super::spec::{ChartKind, ChartSpec, Row};

/// Slice colors for pie charts, picked by row position.
pub const PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A28EFF", "#FF6699",
];

/// Single-series color for bar and line charts.
pub const SERIES_COLOR: &str = "#8884d8";

pub const SCATTER_COLOR: &str = "#82ca9d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartesianStyle {
    Bar,
    Line,
    Scatter,
}

/// A row projected onto the chart axes. `None` marks a missing key or a
/// value that cannot be plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: Option<String>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartesianChart {
    pub style: CartesianStyle,
    pub x_key: String,
    pub y_key: String,
    pub color: &'static str,
    pub points: Vec<DataPoint>,
}

impl CartesianChart {
    /// Points that end up on the plot.
    pub fn plotted(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: Option<String>,
    pub value: Option<f64>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub label_key: String,
    pub value_key: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn plotted(&self) -> usize {
        self.slices
            .iter()
            .filter(|s| s.value.is_some_and(|v| v > 0.0))
            .count()
    }

    pub fn total(&self) -> f64 {
        self.slices
            .iter()
            .filter_map(|s| s.value)
            .filter(|v| *v > 0.0)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Cartesian(CartesianChart),
    Pie(PieChart),
    Unsupported { kind: String },
}

impl ChartView {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartView::Cartesian(chart) => match chart.style {
                CartesianStyle::Bar => ChartKind::Bar,
                CartesianStyle::Line => ChartKind::Line,
                CartesianStyle::Scatter => ChartKind::Scatter,
            },
            ChartView::Pie(_) => ChartKind::Pie,
            ChartView::Unsupported { kind } => ChartKind::Unsupported(kind.clone()),
        }
    }

    pub fn plotted(&self) -> usize {
        match self {
            ChartView::Cartesian(chart) => chart.plotted(),
            ChartView::Pie(chart) => chart.plotted(),
            ChartView::Unsupported { .. } => 0,
        }
    }

    pub fn notice(&self) -> Option<String> {
        match self {
            ChartView::Unsupported { kind } => Some(format!("Unsupported chart type: {kind}")),
            _ => None,
        }
    }
}

/// Maps rows and a chart descriptor onto a view. Returns `None` when either
/// is absent. Keys named by the descriptor are not required to exist in the
/// rows.
pub fn dispatch(rows: Option<&[Row]>, spec: Option<&ChartSpec>) -> Option<ChartView> {
    let (rows, spec) = (rows?, spec?);
    let view = match &spec.kind {
        ChartKind::Bar => cartesian(rows, spec, CartesianStyle::Bar, SERIES_COLOR),
        ChartKind::Line => cartesian(rows, spec, CartesianStyle::Line, SERIES_COLOR),
        ChartKind::Scatter => cartesian(rows, spec, CartesianStyle::Scatter, SCATTER_COLOR),
        ChartKind::Pie => pie(rows, spec),
        ChartKind::Unsupported(kind) => ChartView::Unsupported { kind: kind.clone() },
    };
    Some(view)
}

fn cartesian(
    rows: &[Row],
    spec: &ChartSpec,
    style: CartesianStyle,
    color: &'static str,
) -> ChartView {
    let points = rows
        .iter()
        .map(|row| DataPoint {
            label: row.get(&spec.x).and_then(label_of),
            value: row.get(&spec.y).and_then(number_of),
        })
        .collect();
    ChartView::Cartesian(CartesianChart {
        style,
        x_key: spec.x.clone(),
        y_key: spec.y.clone(),
        color,
        points,
    })
}

fn pie(rows: &[Row], spec: &ChartSpec) -> ChartView {
    let slices = rows
        .iter()
        .enumerate()
        .map(|(i, row)| PieSlice {
            label: row.get(&spec.x).and_then(label_of),
            value: row.get(&spec.y).and_then(number_of),
            color: PALETTE[i % PALETTE.len()],
        })
        .collect();
    ChartView::Pie(PieChart {
        label_key: spec.x.clone(),
        value_key: spec.y.clone(),
        slices,
    })
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numbers plot as-is; numeric strings (decimals often arrive quoted) are
/// parsed; anything else is unplottable.
fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
