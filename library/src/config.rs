use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::geometry::GateLayout;

const CONFIG_FILE_NAME: &str = "config.toml";

/// User-tunable settings for the canvas editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of a gate body in world units.
    pub gate_width: f32,
    /// Height of a gate body in world units.
    pub gate_height: f32,
    /// Hit radius of a socket in world units.
    pub socket_radius: f32,
    /// Whether a gate may feed one of its own inputs.
    pub allow_self_loops: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let layout = GateLayout::default();
        Self {
            gate_width: layout.width,
            gate_height: layout.height,
            socket_radius: layout.socket_radius,
            allow_self_loops: false,
        }
    }
}

impl EditorConfig {
    pub fn layout(&self) -> GateLayout {
        GateLayout {
            width: self.gate_width,
            height: self.gate_height,
            socket_radius: self.socket_radius,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&toml_str)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml_str)?;
        info!("Editor config saved to {}", path.display());
        Ok(())
    }

    /// Loads `config.toml` from the platform config directory.
    ///
    /// A missing file yields the defaults silently; an unreadable or malformed
    /// one yields the defaults with a warning.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => {
                info!("Loaded editor config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config file, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

/// Location of `config.toml`, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "logic-canvas", "logic_canvas")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
