//! Arcade settings
//!
//! One JSON document with a section per game plus audio and asset paths.
//! Every field has a default, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::AudioSettings;
use crate::error::{ArcadeError, Result};
use crate::sim::{CatcherConfig, MazeConfig, RpsConfig, SnakeConfig};

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_SETTINGS_FILE: &str = "gesture-arcade.json";

/// Where the optional sprites and sounds live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub background: PathBuf,
    pub mosquito: PathBuf,
    pub hand: PathBuf,
    pub food: PathBuf,
    pub pickup_sound: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: PathBuf::from("images/bg.jpg"),
            mosquito: PathBuf::from("images/mosquito.jpg"),
            hand: PathBuf::from("images/hand.jpg"),
            food: PathBuf::from("images/Donut.png"),
            pickup_sound: PathBuf::from("pop.wav"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub maze: MazeConfig,
    pub catcher: CatcherConfig,
    pub rps: RpsConfig,
    pub snake: SnakeConfig,
    pub audio: AudioSettings,
    pub assets: AssetPaths,
}

impl Settings {
    pub fn from_json(path: &Path, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| ArcadeError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings.
    ///
    /// An explicit `path` must exist and parse. Without one the default file
    /// is tried; if it is missing or broken the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let json = std::fs::read_to_string(path)?;
            let settings = Self::from_json(path, &json)?;
            log::info!("Loaded settings from {:?}", path);
            return Ok(settings);
        }

        let path = Path::new(DEFAULT_SETTINGS_FILE);
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("No settings file {:?} ({}), using defaults", path, e);
                return Ok(Self::default());
            }
        };

        match Self::from_json(path, &json) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| ArcadeError::Settings {
            path: PathBuf::new(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let json = r#"{ "maze": { "tilt_sensitivity": 35.0 }, "audio": { "muted": true } }"#;
        let settings = Settings::from_json(Path::new("test.json"), json).unwrap();

        assert_eq!(settings.maze.tilt_sensitivity, 35.0);
        assert_eq!(settings.maze.dot_speed, MazeConfig::default().dot_speed);
        assert!(settings.audio.muted);
        assert_eq!(settings.catcher, CatcherConfig::default());
        assert_eq!(settings.assets.food, PathBuf::from("images/Donut.png"));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.snake.round_secs = 60.0;
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(Path::new("mem"), &json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_malformed_file_names_path() {
        match Settings::from_json(Path::new("broken.json"), "{ not json") {
            Err(ArcadeError::Settings { path, .. }) => assert_eq!(path, PathBuf::from("broken.json")),
            other => panic!("expected settings error, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/arcade.json")));
        assert!(matches!(result, Err(ArcadeError::Io(_))));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("gesture_arcade_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "rps": { "prompt_secs": 0.5 } }"#).unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.rps.prompt_secs, 0.5);

        let _ = std::fs::remove_file(&path);
    }
}
