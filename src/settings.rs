//! Game settings and preferences
//!
//! Persisted as JSON next to the executable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::modes::ModeKind;

/// Default settings file name
pub const SETTINGS_FILE: &str = "space_signal_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub sound_enabled: bool,
    pub music_enabled: bool,

    // === Gameplay ===
    /// Mode started when none is given on the command line
    pub preferred_mode: ModeKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            sound_enabled: true,
            music_enabled: true,
            preferred_mode: ModeKind::Classic,
        }
    }
}

impl Settings {
    /// Clamp volumes into 0..=1
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)
            .map(Self::sanitized)
            .map_err(|source| Error::Parse {
                what: "settings",
                source,
            })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| Error::Parse {
            what: "settings",
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "sfx_volume": 0.3 }"#).unwrap();
        assert_eq!(settings.sfx_volume, 0.3);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.preferred_mode, ModeKind::Classic);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 3.0, "music_volume": -1 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let err = Settings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, Error::Parse { what: "settings", .. }));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "space_signal_settings_test_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            preferred_mode: ModeKind::Flappy,
            music_enabled: false,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert_eq!(Settings::load_or_default(path), Settings::default());
        assert!(matches!(Settings::load(path), Err(Error::Io { .. })));
    }
}
