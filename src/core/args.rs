use clap::Parser;
use log::kv::{ToValue, Value};

use crate::view::Theme;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about = "Ask your database questions in plain language")]
pub struct CliArgs {
    #[arg(short, long)]
    pub config: Option<String>,
    /// Overrides `backend.base_url`.
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,
    #[arg(long)]
    pub no_color: bool,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from(["self", "--config", "foo"]);
        assert_eq!(
            args,
            CliArgs {
                config: Some("foo".to_string()),
                base_url: None,
                theme: None,
                no_color: false,
            }
        );
    }

    #[test]
    fn test_args_overrides() {
        let args = CliArgs::parse_from([
            "self",
            "--base-url",
            "http://10.0.0.2:5000",
            "--theme",
            "light",
            "--no-color",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(args.theme, Some(Theme::Light));
        assert!(args.no_color);
    }
}
