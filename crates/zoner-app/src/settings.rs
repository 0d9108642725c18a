// Settings persistence: global editor configuration stored next to the layouts.
// Uses the platform-native config dir: e.g. ~/.config/zoner/settings.json on
// Linux, ~/Library/Application Support/zoner/settings.json on macOS.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use zoner_core::MIN_REGION_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonerSettings {
    /// Smallest region width/height, as a fraction of the monitor.
    #[serde(default = "default_min_region_size")]
    pub min_region_size: f64,
    /// Layout used when `--layout` is not given.
    #[serde(default = "default_layout_name")]
    pub default_layout: String,
}

fn default_min_region_size() -> f64 {
    MIN_REGION_SIZE
}

fn default_layout_name() -> String {
    "default".to_string()
}

impl Default for ZonerSettings {
    fn default() -> Self {
        Self {
            min_region_size: default_min_region_size(),
            default_layout: default_layout_name(),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("zoner"))
}

fn settings_path(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

pub fn load_settings(dir: &Path) -> ZonerSettings {
    let path = settings_path(dir);
    match std::fs::read_to_string(&path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                ZonerSettings::default()
            }
        },
        Err(_) => ZonerSettings::default(),
    }
}

pub fn save_settings(dir: &Path, settings: &ZonerSettings) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        log::error!("Failed to create config dir {}: {}", dir.display(), e);
        return;
    }

    let path = settings_path(dir);
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
