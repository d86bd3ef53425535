use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    #[serde(default = "BackendConfig::default_base_url")]
    pub base_url: String,
    /// Unset means requests wait for the backend indefinitely.
    #[serde(with = "humantime_serde", default)]
    pub request_timeout: Option<Duration>,
}

impl BackendConfig {
    fn default_base_url() -> String {
        String::from("http://localhost:5000")
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout: None,
        }
    }
}
