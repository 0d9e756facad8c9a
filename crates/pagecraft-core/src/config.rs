//! Canvas configuration.

use crate::document::DEFAULT_BACKGROUND;
use crate::history::MAX_HISTORY;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Offset applied to duplicated elements on both axes.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Extra pointer slack around resize handles, in pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 4.0;

/// Tunables for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Size of the canvas viewport that drags are contained in.
    pub viewport_size: Size,
    /// Maximum number of undo states to keep.
    pub max_history: usize,
    /// Background of new documents.
    pub default_background: String,
    /// Extra pointer slack around resize handles.
    pub handle_hit_tolerance: f64,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport_size: Size::new(1200.0, 600.0),
            max_history: MAX_HISTORY,
            default_background: DEFAULT_BACKGROUND.to_string(),
            handle_hit_tolerance: HANDLE_HIT_TOLERANCE,
            duplicate_offset: DUPLICATE_OFFSET,
        }
    }
}

impl CanvasConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
