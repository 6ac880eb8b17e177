//! The draw command stream a GUI library emits each frame.
//!
//! Coordinates are `i16` and sizes `u16`, matching the wire types of
//! immediate-mode GUI toolkits, so geometry math in the rasterizer cannot
//! overflow `i32`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{RasterError, Result};
use crate::geometry::Point2I;

/// Command-stream point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i16,
    pub y: i16,
}

impl Vec2i {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<Vec2i> for Point2I {
    fn from(v: Vec2i) -> Self {
        Point2I::new(v.x as i32, v.y as i32)
    }
}

/// Handle of a font registered with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(pub u32);

/// Handle of an image registered with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u32);

/// One draw command. Consumed by reference; rendering never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Command {
    NoOp,
    Scissor {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
    },
    Line {
        begin: Vec2i,
        end: Vec2i,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    Rect {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        #[serde(default)]
        rounding: u16,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    RectFilled {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        #[serde(default)]
        rounding: u16,
        color: Color,
    },
    RectMultiColor {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        top_left: Color,
        top_right: Color,
        bottom_right: Color,
        bottom_left: Color,
    },
    Circle {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    CircleFilled {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        color: Color,
    },
    /// Not rasterized by this backend
    Arc {
        cx: i16,
        cy: i16,
        r: u16,
        #[serde(default = "one")]
        thickness: u16,
        a: [f32; 2],
        color: Color,
    },
    /// Not rasterized by this backend
    ArcFilled {
        cx: i16,
        cy: i16,
        r: u16,
        a: [f32; 2],
        color: Color,
    },
    Triangle {
        a: Vec2i,
        b: Vec2i,
        c: Vec2i,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    TriangleFilled {
        a: Vec2i,
        b: Vec2i,
        c: Vec2i,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2i>,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    PolygonFilled {
        points: Vec<Vec2i>,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2i>,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    Curve {
        begin: Vec2i,
        ctrl: [Vec2i; 2],
        end: Vec2i,
        #[serde(default = "one")]
        thickness: u16,
        color: Color,
    },
    Text {
        font: FontId,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        /// Pixel height to draw at
        height: f32,
        /// Glyphs blend over existing content; the background is not painted
        #[serde(default)]
        background: Color,
        foreground: Color,
        string: String,
    },
    Image {
        image: ImageId,
        /// Source sub-rectangle `[x, y, w, h]`; the whole image when absent
        #[serde(default)]
        region: Option<[u16; 4]>,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        color: Color,
    },
    /// Host callback region; there is nothing for a rasterizer to do
    Custom {
        x: i16,
        y: i16,
        w: u16,
        h: u16,
    },
}

fn one() -> u16 {
    1
}

/// One frame's ordered command list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<Command>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Save frame to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load frame from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl FromIterator<Command> for Frame {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let json = r#"{
            "commands": [
                { "type": "scissor", "x": 0, "y": 0, "w": 5, "h": 5 },
                { "type": "line", "begin": { "x": 0, "y": 5 }, "end": { "x": 10, "y": 5 },
                  "color": { "r": 255, "g": 0, "b": 0, "a": 255 } },
                { "type": "image", "image": 3, "x": 1, "y": 2, "w": 3, "h": 4,
                  "color": { "r": 255, "g": 255, "b": 255, "a": 255 } }
            ]
        }"#;
        let frame: Frame = serde_json::from_str(json).expect("valid frame");
        assert_eq!(frame.len(), 3);
        assert!(matches!(frame.commands[1], Command::Line { thickness: 1, .. }));
        assert!(matches!(
            frame.commands[2],
            Command::Image {
                image: ImageId(3),
                region: None,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let json = r#"{ "commands": [ { "type": "teapot" } ] }"#;
        assert!(serde_json::from_str::<Frame>(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Frame::load("/nonexistent/frame.json");
        assert!(matches!(err, Err(RasterError::Io { .. })));
    }

    #[test]
    fn test_vec2i_into_point() {
        let p: Point2I = Vec2i::new(-3, 7).into();
        assert_eq!(p, Point2I::new(-3, 7));
    }
}
