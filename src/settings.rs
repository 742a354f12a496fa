//! Game settings with persistence
//!
//! Settings are read from the path given on the command line, or from
//! `~/.config/umbra/settings.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use umbra_core::TimeConfig;
use umbra_game::{CameraConfig, CharacterConfig, FlashCameraConfig};
use umbra_physics::PhysicsConfig;

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub character: CharacterConfig,
    pub flash_camera: FlashCameraConfig,
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
    pub time: TimeConfig,
    pub demo: DemoSettings,
}

/// Headless run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Simulated seconds per rendered frame
    pub frame_delta: f32,
    /// Write the effective settings back after the run
    pub save_on_exit: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frame_delta: 1.0 / 60.0,
            save_on_exit: false,
        }
    }
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("umbra"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path`, or the default location when `None`.
    /// Missing or broken files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::settings_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::read(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: Self = toml::from_str(&content).context("Failed to parse settings")?;
        settings
            .character
            .validate()
            .context("Invalid character settings")?;
        settings
            .flash_camera
            .validate()
            .context("Invalid flash camera settings")?;
        settings.camera.validate().context("Invalid camera settings")?;
        settings.physics.validate().context("Invalid physics settings")?;
        settings.time.validate().context("Invalid time settings")?;
        if settings.demo.frame_delta.is_nan() || settings.demo.frame_delta <= 0.0 {
            anyhow::bail!(
                "Demo frame delta must be positive, got {}",
                settings.demo.frame_delta
            );
        }
        Ok(settings)
    }

    /// Save settings to `path`, or the default location when `None`
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::settings_path().context("Could not determine config directory")?,
        };

        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
