//! TOML-backed startup configuration for the selection store.

use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AppSettings, DisplaySettings, FavoriteSet, StudioState};

/// Favorite seeded into a fresh store when no configuration overrides it.
pub const DEFAULT_SEED_FAVORITE: &str = "n1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Configuration loading failures.
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Read {
        /// Config path on disk.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// The text is not valid TOML for [`StudioConfig`].
    #[error("failed to parse {origin}: {message}")]
    Parse {
        /// Path, or `<inline>` for in-memory text.
        origin: String,
        /// Underlying TOML error text.
        message: String,
    },
    /// The configuration parsed but is semantically invalid.
    #[error("invalid studio config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Wallpaper ids favorited at startup, in display order.
    pub seed: Vec<String>,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            seed: vec![DEFAULT_SEED_FAVORITE.to_string()],
        }
    }
}

/// Startup configuration. Every section and field is optional.
///
/// ```toml
/// [favorites]
/// seed = ["n1", "n4"]
///
/// [display]
/// display_mode = "fill"
/// auto_rotation = true
///
/// [app]
/// image_quality = "medium"
/// notifications_enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub favorites: FavoritesConfig,
    pub display: DisplaySettings,
    pub app: AppSettings,
}

impl StudioConfig {
    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`] for
    /// empty or duplicate seed ids.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(raw, "<inline>")
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Missing or unreadable files surface as [`ConfigError::Read`]; see also
    /// [`StudioConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config = Self::parse(&raw, &path.display().to_string())?;
        debug!("loaded studio config from {}", path.display());
        Ok(config)
    }

    /// Like [`StudioConfig::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Unreadable, malformed, or invalid files are still reported.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw, &path.display().to_string()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "studio config {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    fn parse(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the seed list for empty and repeated ids.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for id in &self.favorites.seed {
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "favorites.seed contains an empty id".to_string(),
                ));
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "favorites.seed lists `{id}` more than once"
                )));
            }
        }
        Ok(())
    }

    /// Store state at startup: seeded favorites, no active wallpaper.
    pub fn initial_state(&self) -> StudioState {
        StudioState {
            active: None,
            favorites: FavoriteSet::from_ids(self.favorites.seed.iter().cloned()),
            display: self.display,
            app: self.app,
        }
    }
}
