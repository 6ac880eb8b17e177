use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Color, PixelLayout};
use crate::error::{RasterError, Result};

/// Chords per Bezier curve when flattening
pub const DEFAULT_CURVE_SEGMENTS: u32 = 22;

/// Renderer settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Layout of surfaces the host allocates (the demo, `Renderer::with_size`)
    pub layout: PixelLayout,
    pub clear_color: Color,
    /// Clear with `clear_color` before each frame unless the caller passes
    /// its own clear color
    pub clear_each_frame: bool,
    pub curve_segments: u32,
    /// Draw lines `thickness` pixels wide instead of always 1px
    pub thick_lines: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: PixelLayout::default(),
            clear_color: Color::rgb(30, 30, 30),
            clear_each_frame: false,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            thick_lines: false,
        }
    }
}

impl RenderConfig {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
