use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use floatdesk_geometry::Size;
use floatdesk_input::GestureConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    pub min_width: f64,
    pub min_height: f64,
    /// Pinch scaling range relative to the size at the start of the pinch.
    pub min_scale: f64,
    pub max_scale: f64,
    pub grid_size: f64,
    /// Snap the window origin to the grid when a drag or resize ends.
    pub snap_to_grid: bool,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_width: 220.0,
            min_height: 160.0,
            min_scale: 0.6,
            max_scale: 1.6,
            grid_size: 24.0,
            snap_to_grid: true,
        }
    }
}

impl WindowManagerConfig {
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    #[must_use]
    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    #[must_use]
    pub fn with_scale_range(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    #[must_use]
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub fn with_snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }
}

/// The configuration of the whole desktop, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Where window layouts are persisted.
    pub layout_path: PathBuf,
    pub windows: WindowManagerConfig,
    pub gestures: GestureConfig,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            layout_path: "floatdesk-layout.json".into(),
            windows: WindowManagerConfig::default(),
            gestures: GestureConfig::default(),
        }
    }
}

impl DesktopConfig {
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Failed to parse desktop configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_toml(&toml).with_context(|| format!("In {}", path.display()))
    }
}
