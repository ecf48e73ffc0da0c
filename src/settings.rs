//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use crate::game::SessionConfig;
use crate::tetromino::MAX_SHAPE_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("tile size must be greater than zero")]
    ZeroTileSize,
    #[error("board of {width}x{height} tiles cannot hold a {min}x{min} piece")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board geometry
    pub board: BoardSettings,
    /// Gravity timing
    pub timing: TimingSettings,
    /// Session options
    pub session: SessionSettings,
}

/// Board geometry in pixels; the grid is derived from the tile size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub screen_width: u32,
    pub screen_height: u32,
    pub tile_size: u32,
}

/// Timing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Interval between automatic one-row drops, in milliseconds
    pub drop_delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Fixed seed for the piece sequence; random when absent
    pub seed: Option<u64>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            screen_width: 500,
            screen_height: 800,
            tile_size: 25,
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self { drop_delay_ms: 500 }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the config directory, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!("using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        Ok(())
    }

    /// Grid columns: screen width over tile size
    pub fn board_width(&self) -> usize {
        self.board
            .screen_width
            .checked_div(self.board.tile_size)
            .unwrap_or(0) as usize
    }

    /// Grid rows: screen height over tile size
    pub fn board_height(&self) -> usize {
        self.board
            .screen_height
            .checked_div(self.board.tile_size)
            .unwrap_or(0) as usize
    }

    pub fn drop_delay(&self) -> Duration {
        Duration::from_millis(self.timing.drop_delay_ms)
    }

    /// Reject geometry the engine cannot play on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board.tile_size == 0 {
            return Err(SettingsError::ZeroTileSize);
        }
        let (width, height) = (self.board_width(), self.board_height());
        if width < MAX_SHAPE_SIZE || height < MAX_SHAPE_SIZE {
            return Err(SettingsError::BoardTooSmall {
                width,
                height,
                min: MAX_SHAPE_SIZE,
            });
        }
        Ok(())
    }

    /// Validated parameters for a new session
    pub fn session_config(&self) -> Result<SessionConfig, SettingsError> {
        self.validate()?;
        Ok(SessionConfig {
            board_width: self.board_width(),
            board_height: self.board_height(),
            drop_delay: self.drop_delay(),
            seed: self.session.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_board() {
        let settings = Settings::default();
        assert_eq!(settings.board_width(), 20);
        assert_eq!(settings.board_height(), 32);
        assert_eq!(settings.drop_delay(), Duration::from_millis(500));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [board]
            tile_size = 50

            [session]
            seed = 9
            "#,
        )
        .unwrap();
        assert_eq!(settings.board.screen_width, 500);
        assert_eq!(settings.board_width(), 10);
        assert_eq!(settings.board_height(), 16);
        assert_eq!(settings.timing.drop_delay_ms, 500);
        assert_eq!(settings.session.seed, Some(9));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = Settings::from_toml_str("[board]\ntile_size = \"big\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let mut settings = Settings::default();
        settings.board.tile_size = 0;
        assert_eq!(settings.board_width(), 0);
        assert!(matches!(settings.validate(), Err(SettingsError::ZeroTileSize)));
        assert!(settings.session_config().is_err());
    }

    #[test]
    fn test_tiny_board_rejected() {
        let mut settings = Settings::default();
        settings.board.screen_width = 60;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::BoardTooSmall { width: 2, height: 32, min: 4 }
        ));
    }

    #[test]
    fn test_session_config() {
        let mut settings = Settings::default();
        settings.timing.drop_delay_ms = 250;
        settings.session.seed = Some(5);
        let config = settings.session_config().unwrap();
        assert_eq!(config.board_width, 20);
        assert_eq!(config.board_height, 32);
        assert_eq!(config.drop_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("blockfall-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.toml");
        let mut settings = Settings::default();
        settings.session.seed = Some(31337);
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("blockfall-does-not-exist/settings.toml");
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Io { .. })
        ));
    }
}
