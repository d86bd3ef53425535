use std::fmt::Write;

use nu_ansi_term::{Color, Style};
use serde_json::Value;

use crate::api::{QueryResponse, Section};
use crate::chart::{DrawOptions, Row, dispatch, draw};
use crate::chat::ChatInterface;
use crate::form::{ConnectionForm, Field};

use super::{Route, Theme};

pub const APP_TITLE: &str = "InsightIQ";

/// How the `data` section is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Pretty-printed JSON, as the backend sent it.
    #[default]
    Json,
    Grid,
}

impl DataFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Grid => "grid",
        }
    }

    pub fn toggled(self) -> DataFormat {
        match self {
            DataFormat::Json => DataFormat::Grid,
            DataFormat::Grid => DataFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub theme: Theme,
    pub color: bool,
    pub data_format: DataFormat,
    pub chart_width: usize,
}

impl Renderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self {
            theme,
            color,
            data_format: DataFormat::default(),
            chart_width: DrawOptions::default().width,
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn header(&self, route: Route) -> String {
        format!(
            "{}  [{} theme]  {}",
            self.paint(self.theme.heading(), APP_TITLE),
            self.theme,
            self.paint(self.theme.muted(), route.path())
        )
    }

    pub fn form(&self, form: &ConnectionForm) -> String {
        let mut out = String::new();
        let title = self.paint(self.theme.heading(), "Connect to your database");
        let _ = writeln!(out, "{title}");
        for field in Field::ALL {
            let value = form.draft().get(field);
            let shown = if field.is_secret() {
                "*".repeat(value.chars().count())
            } else {
                value.to_string()
            };
            let _ = writeln!(out, "  {:<9} {shown}", format!("{}:", field.label()));
        }
        let _ = writeln!(out, "[{}]", self.paint(self.theme.accent(), form.button_label()));
        if let Some(status) = form.status() {
            let style = if status.is_success() {
                Color::Green.bold()
            } else {
                Color::Red.bold()
            };
            let _ = writeln!(out, "{}", self.paint(style, status.message()));
        }
        out
    }

    pub fn chat(&self, chat: &ChatInterface) -> String {
        match chat.response() {
            Some(response) => self.response(response),
            None if chat.is_loading() => format!("{}\n", chat.button_label()),
            None => String::new(),
        }
    }

    /// Every section present in the answer, each independently.
    pub fn response(&self, response: &QueryResponse) -> String {
        let mut out = String::new();
        for section in response.sections() {
            match section {
                Section::Error(msg) => {
                    let line = format!("Error: {msg}");
                    let _ = writeln!(out, "{}", self.paint(Color::Red.bold(), &line));
                }
                Section::Sql(sql) => {
                    let _ = writeln!(out, "{}", self.paint(self.theme.muted(), "Generated SQL:"));
                    for line in sql.lines() {
                        let _ = writeln!(out, "    {line}");
                    }
                }
                Section::Explanation(answer) => {
                    let _ = writeln!(out, "{}", self.paint(self.theme.muted(), "AI Explanation:"));
                    let _ = writeln!(out, "{answer}");
                }
                Section::Table(rows) => {
                    let _ = writeln!(out, "{}", self.paint(self.theme.muted(), "Query Result:"));
                    let _ = writeln!(out, "{}", self.rows(rows));
                }
                Section::Chart { spec, rows } => {
                    let Some(view) = dispatch(Some(rows.as_slice()), Some(spec)) else {
                        continue;
                    };
                    let _ = writeln!(out, "{}", self.paint(self.theme.muted(), "Chart:"));
                    let opts = DrawOptions {
                        width: self.chart_width,
                        color: self.color,
                    };
                    let _ = writeln!(out, "{}", draw(&view, opts).trim_end());
                }
            }
        }
        out
    }

    fn rows(&self, rows: &[Row]) -> String {
        match self.data_format {
            DataFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_default(),
            DataFormat::Grid => grid(rows),
        }
    }
}

/// Columns are every key seen, in first-seen order; missing cells stay blank.
fn grid(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut builder = tabled::builder::Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for row in rows {
        builder.push_record(columns.iter().map(|c| match row.get(*c) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }));
    }
    let mut table = builder.build();
    table.with(tabled::settings::Style::rounded());
    table.to_string()
}
