use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;

use crate::bencode::DEFAULT_MAX_DEPTH;

/// Default location looked up when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "bencode-info.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_depth: usize,          // nesting limit for lists/dictionaries
    pub missing_announce: String,  // reported when a torrent has no announce URL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            missing_announce: "No found URL".to_string(),
        }
    }
}

impl Config {
    /// Reads `path` when it exists, falling back to the defaults otherwise.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let toml = toml::to_string(self)?;
        fs::write(path.as_ref(), toml)
            .with_context(|| format!("writing config {}", path.as_ref().display()))?;
        Ok(())
    }
}
