use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::InsightError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_state_dir")]
    pub state_dir: PathBuf,
}

impl StorageConfig {
    fn default_state_dir() -> PathBuf {
        resolve_state_dir().expect(
            "failed to resolve state dir: set storage.state_dir or INSIGHTIQ_STORAGE__STATE_DIR",
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: Self::default_state_dir(),
        }
    }
}

/// Platform data dir when it can be created, else `$TMP/.insightiq`.
fn resolve_state_dir() -> Result<PathBuf, InsightError> {
    if let Some(dirs) = directories::ProjectDirs::from("io", "insightiq", "insightiq") {
        let data_dir = dirs.data_dir();
        match std::fs::create_dir_all(data_dir) {
            Ok(()) => {
                debug!("using state dir: {}", data_dir.display());
                return Ok(data_dir.to_path_buf());
            }
            Err(e) => warn!("cannot create {}: {e}", data_dir.display()),
        }
    }

    let fallback = std::env::temp_dir().join(".insightiq");
    std::fs::create_dir_all(&fallback).map_err(|e| {
        InsightError::ConfigParsingError(format!(
            "no usable state directory, {} failed: {e}",
            fallback.display()
        ))
    })?;
    debug!("using fallback state dir: {}", fallback.display());
    Ok(fallback)
}
