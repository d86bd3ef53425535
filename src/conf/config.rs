use crate::{
    conf::{BackendConfig, StorageConfig, UiConfig},
    core::{
        CliArgs,
        InsightError::{self, ConfigParsingError},
    },
};
use config::{Config as CConfig, ConfigBuilder, Environment, Map, builder::DefaultState};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "INSIGHTIQ";

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, InsightError> {
        let builder = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml));
        Self::build(builder)
    }

    /// Loads the optional TOML file at `path`, then applies `INSIGHTIQ_*`
    /// environment overrides (`INSIGHTIQ_BACKEND__BASE_URL=...`).
    pub fn load(path: Option<&str>) -> Result<Config, InsightError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of the
    /// process environment when it is given.
    fn load_with_env(
        path: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> Result<Config, InsightError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );
        Self::build(builder)
    }

    /// Command-line flags win over every other source. `--theme` is resolved
    /// separately since the stored theme sits between it and the config.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(base_url) = &args.base_url {
            self.backend.base_url = base_url.clone();
        }
        if args.no_color {
            self.ui.color = false;
        }
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, InsightError> {
        let config = builder
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }
}
