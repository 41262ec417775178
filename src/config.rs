use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub default_language: String,
    pub output_dir: String,
    pub export_formats: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            output_dir: "data".to_string(),
            export_formats: vec!["json".to_string()],
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, or else from the first standard location that exists.
    /// An explicit path must exist and parse; the standard locations fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = explicit else {
            return Ok(Self::load_first(&settings_paths()));
        };

        if !path.exists() {
            bail!("settings file not found: {}", path.display());
        }
        let settings =
            Self::from_file(path).wrap_err_with(|| format!("failed to load settings from {}", path.display()))?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn load_first(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|p| p.exists()) else {
            debug!("No settings file found in {candidates:?}");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Failed to load settings from {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content).wrap_err("invalid settings JSON")?;
        Ok(settings)
    }
}

/// Standard settings locations, in lookup order
pub fn settings_paths() -> Vec<PathBuf> {
    let config_dir = PathBuf::from("config");
    vec![
        config_dir.join("settings.json"),
        config_dir.join("settings.example.json"),
        user_settings_path(),
    ]
}

pub fn user_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsubs")
        .join("settings.json")
}
