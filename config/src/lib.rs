//! Configuration loading for dreamcrusher.
//!
//! ```toml
//! [app]
//! ascii_only = false
//!
//! [game]
//! difficulty = 7
//! tick_interval_ms = 550
//!
//! [log]
//! level = "debug"
//! ```
//!
//! Raw TOML structs keep `Option` fields; [`GameSettings`] is the resolved form
//! the engine consumes. Out-of-range values fail at parse time because the
//! field types validate themselves.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crusher_types::{Difficulty, TickInterval};

/// Environment override for the delay between weeks, in milliseconds.
pub const TICK_ENV_VAR: &str = "DREAMCRUSHER_TICK_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrusherConfig {
    pub app: Option<AppConfig>,
    pub game: Option<GameConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Use ASCII-only glyphs in the grid.
    #[serde(default)]
    pub ascii_only: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Numbers per ticket: 5, 6 or 7.
    pub difficulty: Option<Difficulty>,
    /// Delay between weeks. 50..=3000.
    pub tick_interval_ms: Option<TickInterval>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, e.g. `"debug"` or `"crusher_engine=trace"`.
    pub level: Option<String>,
}

impl CrusherConfig {
    /// Load `~/.dreamcrusher/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.ascii_only)
    }

    #[must_use]
    pub fn log_level(&self) -> Option<&str> {
        self.log
            .as_ref()
            .and_then(|log| log.level.as_deref())
            .map(str::trim)
            .filter(|level| !level.is_empty())
    }
}

/// Resolved game settings: defaults, then config file, then environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub tick_interval: TickInterval,
}

impl GameSettings {
    #[must_use]
    pub fn resolve(config: Option<&CrusherConfig>) -> Self {
        let env_tick = env::var(TICK_ENV_VAR).ok();
        Self::resolve_with_env(config, env_tick.as_deref())
    }

    /// Same as [`GameSettings::resolve`] with the environment value passed in.
    #[must_use]
    pub fn resolve_with_env(config: Option<&CrusherConfig>, env_tick: Option<&str>) -> Self {
        let game = config.and_then(|cfg| cfg.game.as_ref());
        let difficulty = game.and_then(|g| g.difficulty).unwrap_or_default();
        let mut tick_interval = game.and_then(|g| g.tick_interval_ms).unwrap_or_default();

        if let Some(raw) = env_tick {
            match raw.trim().parse::<u64>().map(TickInterval::from_millis) {
                Ok(Ok(interval)) => tick_interval = interval,
                Ok(Err(err)) => tracing::warn!("Ignoring {TICK_ENV_VAR}: {err}"),
                Err(err) => tracing::warn!("Ignoring {TICK_ENV_VAR}={raw:?}: {err}"),
            }
        }

        Self {
            difficulty,
            tick_interval,
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

/// `~/.dreamcrusher`, home of the config file and logs.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".dreamcrusher"))
}
