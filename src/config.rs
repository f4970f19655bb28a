use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::catalog::{load_catalog, Catalog};
use crate::error::{GameError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "URINAL_GAME_CONFIG";

/// Picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "urinal-game.toml";

/// Tunable delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause between a scored answer and the feedback screen.
    pub feedback_delay_ms: u64,
    /// Pause before a wrong answer reveals the accepted fixtures.
    pub reveal_delay_ms: u64,
    /// 0 leaves the feedback screen up until the player continues.
    pub auto_advance_delay_ms: u64,
    /// Expected catalog size; 0 skips the check.
    pub total_scenarios: usize,
    /// Load scenarios from here instead of the built-in set.
    pub scenario_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 300,
            reveal_delay_ms: 200,
            auto_advance_delay_ms: 0,
            total_scenarios: 6,
            scenario_dir: None,
        }
    }
}

impl GameConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn auto_advance_delay(&self) -> Option<Duration> {
        (self.auto_advance_delay_ms > 0).then(|| Duration::from_millis(self.auto_advance_delay_ms))
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| GameError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content, path)?;
        // A relative scenario_dir is relative to the config file.
        if let (Some(dir), Some(parent)) = (&config.scenario_dir, path.parent()) {
            if dir.is_relative() {
                config.scenario_dir = Some(parent.join(dir));
            }
        }
        Ok(config)
    }

    /// `$URINAL_GAME_CONFIG`, then `./urinal-game.toml`, then defaults.
    pub fn discover() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::discover_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn discover_from(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None if fallback.is_file() => {
                debug!(path = %fallback.display(), "loading config");
                Self::load(fallback)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.scenario_dir {
            Some(dir) => load_catalog(dir),
            None => Catalog::builtin(),
        }
    }
}
