mod blit;
mod canvas;
mod font;
mod raster;
mod surface;
#[cfg(feature = "sdl")]
pub mod window;

pub use canvas::Canvas;
pub use font::{Font, Glyph};
pub use raster::Quadrant;
pub use surface::{PixelSurface, ScissorRect};
