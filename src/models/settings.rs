//! Engine settings, loaded from TOML.

use crate::error::{NotefallError, Result};
use crate::models::engine::{HitWindow, KeyMap, PlayfieldConfig, normalize_key};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default config file looked up next to the binary.
pub const SETTINGS_FILE: &str = "notefall.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Seconds a note takes from spawn to the hit zone.
    pub travel_duration: f64,
    /// Hit tolerance around the hit zone, in playfield pixels.
    pub hit_window: f64,
    /// Seconds between procedural spawns (empty chart only).
    pub spawn_interval: f64,
    /// Progress at which an unjudged note is dropped (> 1.0).
    pub expiry_threshold: f64,
    pub reward_per_hit: u32,
    /// Buffer applied when recomputing the chart cursor after a seek.
    pub seek_epsilon: f64,
    /// Render ticks per second driven by the logic thread.
    pub tick_rate: u32,
    pub playfield: PlayfieldConfig,
    /// One key name per lane, left to right.
    pub keybinds: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            travel_duration: 2.5,
            hit_window: 40.0,
            spawn_interval: 0.6,
            expiry_threshold: 1.2,
            reward_per_hit: 10,
            seek_epsilon: 0.1,
            tick_rate: 200,
            playfield: PlayfieldConfig::default(),
            keybinds: ["KeyA", "KeyS", "KeyD", "KeyF"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl EngineSettings {
    /// Loads and validates settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| NotefallError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path` if it exists, defaults otherwise. Invalid files are
    /// reported and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("CONFIG: Loaded {:?}", path);
                settings
            }
            Err(e) => {
                log::error!("CONFIG: {}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| NotefallError::InvalidConfig {
            field: "settings",
            message: e.to_string(),
        })?;
        fs::write(path, content).map_err(|source| NotefallError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, message: &str) -> Result<()> {
            Err(NotefallError::InvalidConfig {
                field,
                message: message.to_string(),
            })
        }

        if !(self.travel_duration > 0.0) {
            return invalid("travel_duration", "must be positive");
        }
        if !(self.hit_window >= 0.0) {
            return invalid("hit_window", "must not be negative");
        }
        if !(self.spawn_interval > 0.0) {
            return invalid("spawn_interval", "must be positive");
        }
        if !(self.expiry_threshold > 1.0) {
            return invalid("expiry_threshold", "must be greater than 1.0");
        }
        if !(self.seek_epsilon >= 0.0) {
            return invalid("seek_epsilon", "must not be negative");
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate", "must be at least 1");
        }
        if self.playfield.travel_distance() <= 0.0 {
            return invalid("playfield", "hit_zone_offset must be below spawn_offset");
        }
        if self.keybinds.is_empty() {
            return invalid("keybinds", "at least one lane is required");
        }
        let mut seen = HashSet::new();
        for key in &self.keybinds {
            let name = normalize_key(key).unwrap_or_else(|| key.clone());
            if !seen.insert(name) {
                return invalid("keybinds", &format!("{:?} is bound to more than one lane", key));
            }
        }
        Ok(())
    }

    pub fn keymap(&self) -> KeyMap {
        KeyMap::new(&self.keybinds)
    }

    pub fn hit_window(&self) -> HitWindow {
        HitWindow::new(self.hit_window)
    }

    /// Note speed in playfield pixels per second.
    pub fn note_speed(&self) -> f64 {
        self.playfield.travel_distance() / self.travel_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.keymap().lane_count(), 4);
        assert!((settings.note_speed() - 168.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: EngineSettings = toml::from_str(
            r#"
            travel_duration = 2.0
            keybinds = ["d", "f", "j", "k"]

            [playfield]
            hit_zone_offset = 500.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.travel_duration, 2.0);
        assert_eq!(settings.hit_window, 40.0);
        assert_eq!(settings.playfield.spawn_offset, -20.0);
        assert_eq!(settings.playfield.hit_zone_offset, 500.0);
        assert!(settings.keymap().lane_for("j").is_some());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = EngineSettings::default();
        settings.expiry_threshold = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(NotefallError::InvalidConfig {
                field: "expiry_threshold",
                ..
            })
        ));

        let mut settings = EngineSettings::default();
        settings.keybinds.clear();
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.travel_duration = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_keybinds() {
        let mut settings = EngineSettings::default();
        settings.keybinds = vec!["a".into(), "a".into()];
        assert!(matches!(
            settings.validate(),
            Err(NotefallError::InvalidConfig {
                field: "keybinds",
                ..
            })
        ));

        // Shorthand and full names collide once normalized.
        settings.keybinds = vec!["d".into(), "KeyD".into()];
        assert!(settings.validate().is_err());

        settings.keybinds = vec!["d".into(), "f".into()];
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("notefall_settings_test.toml");
        let mut settings = EngineSettings::default();
        settings.reward_per_hit = 25;
        settings.save(&path).unwrap();

        let loaded = EngineSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(EngineSettings::load_or_default(&path), EngineSettings::default());
    }
}
