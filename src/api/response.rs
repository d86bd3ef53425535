use log::warn;
use serde_json::Value;

use crate::chart::{ChartSpec, Row};

/// One renderable part of an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Error(String),
    Sql(String),
    Explanation(String),
    Table(Vec<Row>),
    Chart { spec: ChartSpec, rows: Vec<Row> },
}

/// An `/ask` answer reduced to the sections worth showing, in display order:
/// error, SQL, explanation, table, chart.
///
/// The backend sends a bag of optional fields with no rules between them, so
/// the body is checked field by field here. Fields that are absent, empty or
/// of the wrong shape are dropped rather than failing the whole answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    sections: Vec<Section>,
}

impl QueryResponse {
    pub fn from_body(body: &Value) -> Self {
        let text = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let rows = match body.get("data") {
            None | Some(Value::Null) => None,
            Some(data) => match serde_json::from_value::<Vec<Row>>(data.clone()) {
                Ok(rows) => Some(rows),
                Err(e) => {
                    warn!("ignoring malformed data field: {e}");
                    None
                }
            },
        };

        let chart = match body.get("chart") {
            None | Some(Value::Null) => None,
            Some(chart) => match serde_json::from_value::<ChartSpec>(chart.clone()) {
                Ok(spec) => Some(spec),
                Err(e) => {
                    warn!("ignoring malformed chart field: {e}");
                    None
                }
            },
        };

        let mut sections = Vec::new();
        if let Some(error) = text("error") {
            sections.push(Section::Error(error));
        }
        if let Some(sql) = text("sql") {
            sections.push(Section::Sql(sql));
        }
        if let Some(answer) = text("answer") {
            sections.push(Section::Explanation(answer));
        }
        if let Some(rows) = rows {
            if let Some(spec) = chart {
                sections.push(Section::Table(rows.clone()));
                sections.push(Section::Chart { spec, rows });
            } else {
                sections.push(Section::Table(rows));
            }
        }
        Self { sections }
    }

    /// An answer carrying only an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            sections: vec![Section::Error(message.into())],
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Error(msg) => Some(msg.as_str()),
            _ => None,
        })
    }

    pub fn sql(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Sql(sql) => Some(sql.as_str()),
            _ => None,
        })
    }

    pub fn rows(&self) -> Option<&[Row]> {
        self.sections.iter().find_map(|s| match s {
            Section::Table(rows) => Some(rows.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use serde_json::json;

    fn kinds(resp: &QueryResponse) -> Vec<&'static str> {
        resp.sections()
            .iter()
            .map(|s| match s {
                Section::Error(_) => "error",
                Section::Sql(_) => "sql",
                Section::Explanation(_) => "answer",
                Section::Table(_) => "table",
                Section::Chart { .. } => "chart",
            })
            .collect()
    }

    #[test]
    fn test_full_body_in_display_order() {
        let resp = QueryResponse::from_body(&json!({
            "chart": {"type": "bar", "x": "category", "y": "value"},
            "data": [{"category": "A", "value": 10}],
            "answer": "A sold ten units.",
            "sql": "SELECT category, value FROM sales",
        }));
        assert_eq!(kinds(&resp), vec!["sql", "answer", "table", "chart"]);
        assert_eq!(resp.sql(), Some("SELECT category, value FROM sales"));

        let Section::Chart { spec, rows } = &resp.sections()[3] else {
            panic!("expected chart section");
        };
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_error_only() {
        let resp = QueryResponse::from_body(&json!({"error": "no such table"}));
        assert_eq!(kinds(&resp), vec!["error"]);
        assert_eq!(resp.error_message(), Some("no such table"));
    }

    #[test]
    fn test_error_alongside_other_fields() {
        let resp = QueryResponse::from_body(&json!({"error": "partial", "sql": "SELECT 1"}));
        assert_eq!(kinds(&resp), vec!["error", "sql"]);
    }

    #[test]
    fn test_chart_without_data_is_dropped() {
        let resp = QueryResponse::from_body(&json!({
            "sql": "SELECT 1",
            "chart": {"type": "line", "x": "a", "y": "b"}
        }));
        assert_eq!(kinds(&resp), vec!["sql"]);
    }

    #[test]
    fn test_empty_data_still_shows_table() {
        let resp = QueryResponse::from_body(&json!({"data": []}));
        assert_eq!(kinds(&resp), vec!["table"]);
        assert_eq!(resp.rows().map(<[Row]>::len), Some(0));
    }

    #[test]
    fn test_malformed_fields_are_dropped() {
        let resp = QueryResponse::from_body(&json!({
            "sql": 42,
            "answer": "",
            "data": "not rows",
            "chart": {"type": "bar"}
        }));
        assert!(resp.is_empty());
    }

    #[test]
    fn test_malformed_chart_keeps_table() {
        let resp = QueryResponse::from_body(&json!({
            "data": [{"a": 1}],
            "chart": {"kind": "bar"}
        }));
        assert_eq!(kinds(&resp), vec!["table"]);
    }

    #[test]
    fn test_non_object_body_is_empty() {
        assert!(QueryResponse::from_body(&json!([1, 2, 3])).is_empty());
        assert!(QueryResponse::from_body(&Value::Null).is_empty());
    }
}
