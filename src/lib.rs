//! Software rasterizer for immediate-mode GUI draw commands.
//!
//! A [`Renderer`] owns a [`PixelSurface`] (caller memory: a `Vec<u8>`, an
//! mmap'd framebuffer, a shm slice) and turns each [`Frame`] of [`Command`]s
//! into pixels: lines, rectangles, ellipses, polygons, gradients, curves,
//! text and images, all clipped to the current scissor.
//!
//! ```
//! use rawfb::{Color, Command, Frame, RenderConfig, Renderer};
//!
//! let mut renderer = Renderer::with_size(64, 64, RenderConfig::default());
//! let mut frame = Frame::new();
//! frame.push(Command::RectFilled { x: 8, y: 8, w: 16, h: 16, rounding: 4, color: Color::WHITE });
//! renderer.render(&frame, Some(Color::BLACK));
//! assert_eq!(renderer.surface().get_pixel(16, 16), Some(Color::WHITE));
//! ```

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod render;
pub mod texture;

pub use color::{Color, PixelLayout};
pub use command::{Command, FontId, Frame, ImageId, Vec2i};
pub use config::RenderConfig;
pub use display::{Canvas, Font, Glyph, PixelSurface, Quadrant, ScissorRect};
pub use error::{RasterError, Result};
pub use geometry::{Point2I, Rect};
pub use render::{FrameStats, RenderState, Renderer};
pub use texture::{Image, SurfaceFormat};
