//! Scene configuration: which backdrop layers run and how.
//!
//! Defaults match the hero-page setup; a JSON file or command-line flags
//! can override individual fields.

use std::fmt;
use std::fs;
use std::path::Path;

use anim::theme::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which animation layers to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// The warped grid plane alone.
    GridWarp,
    /// The particle flow alone.
    Flow,
    /// Both layers, flow over grid.
    Both,
}

impl SceneKind {
    pub fn from_arg(arg: &str) -> Option<SceneKind> {
        match arg {
            "gridwarp" => Some(SceneKind::GridWarp),
            "flow" => Some(SceneKind::Flow),
            "both" => Some(SceneKind::Both),
            _ => None,
        }
    }

    pub fn has_gridwarp(self) -> bool {
        matches!(self, SceneKind::GridWarp | SceneKind::Both)
    }

    pub fn has_flow(self) -> bool {
        matches!(self, SceneKind::Flow | SceneKind::Both)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scene: SceneKind,
    /// Particle pool size for the flow layer.
    pub particle_count: usize,
    /// Start in dark mode instead of light.
    pub dark: bool,
    /// Smaller window and half the particle pool.
    pub compact: bool,
    /// Draw the activation glow flashes.
    pub glow: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Both,
            particle_count: 300,
            dark: false,
            compact: false,
            glow: false,
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<SceneConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&text).map_err(ConfigError::Parse)
    }

    pub fn effective_particle_count(&self) -> usize {
        if self.compact {
            self.particle_count / 2
        } else {
            self.particle_count
        }
    }

    pub fn initial_theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}
