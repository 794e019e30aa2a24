use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::NutritionTarget;
use crate::selector::SelectorSettings;
use crate::state::{read_json, write_json_pretty};

/// Default location of the config file.
pub const DEFAULT_CONFIG_PATH: &str = "daily_menu.json";

/// Default directory for catalog copies and ledgers.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Settings remembered between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog opened last, reused when no `--catalog` is given.
    pub last_catalog: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub default_target: NutritionTarget,
    pub selector: SelectorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_catalog: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_target: NutritionTarget::default(),
            selector: SelectorSettings::default(),
        }
    }
}

impl AppConfig {
    /// Read the config, falling back to defaults if it is missing or broken.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match read_json(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json_pretty(path, self)
    }
}
