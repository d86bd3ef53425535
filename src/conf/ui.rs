use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::view::Theme;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "UiConfig::default_color")]
    pub color: bool,
    /// Pause between a successful connect and the switch to the chat view.
    #[serde(
        with = "humantime_serde",
        default = "UiConfig::default_connect_redirect_delay"
    )]
    pub connect_redirect_delay: Duration,
}

impl UiConfig {
    fn default_color() -> bool {
        true
    }

    fn default_connect_redirect_delay() -> Duration {
        Duration::from_millis(500)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color: Self::default_color(),
            connect_redirect_delay: Self::default_connect_redirect_delay(),
        }
    }
}
