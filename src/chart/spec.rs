use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row: column name to scalar, in the order the backend sent them.
pub type Row = Map<String, Value>;

/// Declared chart type. Tags outside the known set are kept verbatim so the
/// notice can name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Unsupported(String),
}

impl ChartKind {
    pub fn tag(&self) -> &str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Unsupported(tag) => tag,
        }
    }
}

impl From<String> for ChartKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bar" => ChartKind::Bar,
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            "scatter" => ChartKind::Scatter,
            _ => ChartKind::Unsupported(tag),
        }
    }
}

impl From<ChartKind> for String {
    fn from(kind: ChartKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Row key for the category axis (pie: slice label).
    pub x: String,
    /// Row key for the value axis (pie: slice value).
    pub y: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bar("bar", ChartKind::Bar)]
    #[case::line("line", ChartKind::Line)]
    #[case::pie("pie", ChartKind::Pie)]
    #[case::scatter("scatter", ChartKind::Scatter)]
    #[case::label("Pie Chart", ChartKind::Unsupported("Pie Chart".to_string()))]
    #[case::uppercase("BAR", ChartKind::Unsupported("BAR".to_string()))]
    fn test_kind_from_tag(#[case] tag: &str, #[case] expected: ChartKind) {
        let spec: ChartSpec =
            serde_json::from_value(serde_json::json!({"type": tag, "x": "a", "y": "b"})).unwrap();
        assert_eq!(spec.kind, expected);
        assert_eq!(spec.kind.tag(), tag);
    }

    #[test]
    fn test_spec_serializes_type_tag() {
        let spec = ChartSpec {
            kind: ChartKind::Scatter,
            x: "month".to_string(),
            y: "total".to_string(),
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json, serde_json::json!({"type": "scatter", "x": "month", "y": "total"}));
    }
}
