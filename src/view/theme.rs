use std::fmt;

use log::warn;
use nu_ansi_term::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::core::InsightError;
use crate::session::KeyValueStore;

pub const THEME_KEY: &str = "ui-theme";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(name: &str) -> Option<Theme> {
        match name.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Stored theme, if any. An unrecognised value is ignored.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Theme>, InsightError> {
        let stored = store.get(THEME_KEY)?;
        Ok(stored.and_then(|name| {
            let theme = Theme::parse(&name);
            if theme.is_none() {
                warn!("ignoring unknown stored theme '{name}'");
            }
            theme
        }))
    }

    /// Startup theme: the command-line flag, then the stored choice, then config.
    pub fn resolve(flag: Option<Theme>, stored: Option<Theme>, configured: Theme) -> Theme {
        flag.or(stored).unwrap_or(configured)
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), InsightError> {
        store.set(THEME_KEY, self.name())
    }

    pub fn heading(&self) -> Style {
        match self {
            Theme::Light => Color::Black.bold(),
            Theme::Dark => Color::White.bold(),
        }
    }

    pub fn muted(&self) -> Style {
        match self {
            Theme::Light => Style::new().fg(Color::DarkGray),
            Theme::Dark => Style::new().fg(Color::LightGray).dimmed(),
        }
    }

    pub fn accent(&self) -> Style {
        match self {
            Theme::Light => Color::Blue.bold(),
            Theme::Dark => Color::LightBlue.bold(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
