//! Persisted window layouts, one JSON record per window.

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Geometry, KeyValueStore, WindowId, WindowMode, WindowRecord};

pub const LAYOUT_KEY_PREFIX: &str = "floatdesk.layout.";

pub fn layout_key(id: &WindowId) -> String {
    format!("{LAYOUT_KEY_PREFIX}{id}")
}

/// Rotation and scale are transient and never written, but tolerated when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub minimized: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub maximized: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PersistedLayout {
    pub fn from_record(record: &WindowRecord) -> Self {
        let geometry = record.normal_geometry();
        Self {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: None,
            scale: None,
            minimized: record.mode == WindowMode::Minimized,
            maximized: record.restore_geometry.is_some(),
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Loads the layout of a window. Missing, malformed, or nonsensical records are `None`.
pub fn load_layout(store: &impl KeyValueStore, id: &WindowId) -> Option<PersistedLayout> {
    let json = store.get(&layout_key(id))?;
    match serde_json::from_str::<PersistedLayout>(&json) {
        Ok(layout) if layout.is_valid() => Some(layout),
        Ok(layout) => {
            warn!("Ignoring invalid layout of {id}: {layout:?}");
            None
        }
        Err(e) => {
            warn!("Ignoring malformed layout of {id}: {e}");
            None
        }
    }
}

pub fn save_layout(
    store: &mut impl KeyValueStore,
    id: &WindowId,
    layout: &PersistedLayout,
) -> Result<()> {
    store.set(&layout_key(id), serde_json::to_string(layout)?)
}

pub fn remove_layout(store: &mut impl KeyValueStore, id: &WindowId) -> Result<()> {
    store.remove(&layout_key(id))
}
