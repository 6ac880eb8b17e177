use super::surface::{PixelSurface, ScissorRect};
use crate::color::{Color, PixelLayout};
use crate::error::Result;

/// Drawing context: a surface plus the clip rectangle every write honours.
///
/// All rasterizer and blitter entry points are methods on this type (see
/// `raster.rs` and `blit.rs`); they only touch memory through the three
/// compositor primitives below.
pub struct Canvas<B = Vec<u8>> {
    surface: PixelSurface<B>,
    scissor: ScissorRect,
    thick_lines: bool,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Canvas<B> {
    pub fn new(surface: PixelSurface<B>) -> Self {
        let scissor = ScissorRect::full(surface.width(), surface.height());
        Self {
            surface,
            scissor,
            thick_lines: false,
        }
    }

    #[inline]
    pub fn surface(&self) -> &PixelSurface<B> {
        &self.surface
    }

    /// Swap in new pixel memory (resize, new mmap) and reset the scissor to
    /// the new bounds. Returns the previous memory.
    pub fn replace_surface(
        &mut self,
        pixels: B,
        width: u32,
        height: u32,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<B> {
        let old = self.surface.replace(pixels, width, height, pitch, layout)?;
        self.reset_scissor();
        Ok(old)
    }

    pub fn into_surface(self) -> PixelSurface<B> {
        self.surface
    }

    #[inline]
    pub fn scissor(&self) -> ScissorRect {
        self.scissor
    }

    /// Clip to `x, y, w, h`, clamped to the surface
    pub fn set_scissor(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.scissor = ScissorRect::clamped(
            x,
            y,
            w,
            h,
            self.surface.width(),
            self.surface.height(),
        );
    }

    /// Clip to the whole surface
    pub fn reset_scissor(&mut self) {
        self.scissor = ScissorRect::full(self.surface.width(), self.surface.height());
    }

    /// Honour line thickness instead of drawing every line 1px wide
    pub fn set_thick_lines(&mut self, enabled: bool) {
        self.thick_lines = enabled;
    }

    #[inline]
    pub fn thick_lines(&self) -> bool {
        self.thick_lines
    }

    /// Fill the whole surface, regardless of the scissor
    pub fn clear(&mut self, color: Color) {
        self.surface.clear(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.surface.get_pixel(x, y)
    }

    // ========================================================================
    // Compositor
    // ========================================================================

    /// Opaque write. Dropped silently outside the scissor.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        // The scissor is clamped to the surface, so this is also the bounds check
        if self.scissor.contains(x, y) {
            let word = self.surface.layout().pack(color);
            self.surface.write_word(x as u32, y as u32, word);
        }
    }

    /// Source-over blend: `(src*a + dst*(255-a)) >> 8` per color channel.
    /// Alpha 0 is a no-op, alpha 255 an exact overwrite. The source alpha is
    /// what lands in the alpha channel.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        match color.a {
            0 => {},
            255 => self.set_pixel(x, y, color),
            a => {
                if !self.scissor.contains(x, y) {
                    return;
                }
                let layout = self.surface.layout();
                let dst = layout.unpack(self.surface.read_word(x as u32, y as u32));
                let out = Color {
                    r: blend_channel(color.r, dst.r, a),
                    g: blend_channel(color.g, dst.g, a),
                    b: blend_channel(color.b, dst.b, a),
                    a,
                };
                self.surface.write_word(x as u32, y as u32, layout.pack(out));
            },
        }
    }

    /// Horizontal run from `x0` to `x1` inclusive (either order) on row `y`.
    /// Same result as `set_pixel` for each x, written a row slice at a time.
    pub fn fill_span(&mut self, x0: i32, y: i32, x1: i32, color: Color) {
        let s = self.scissor;
        if y < s.top || y >= s.bottom {
            return;
        }
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let start = x0.max(s.left);
        let end = x1.min(s.right - 1);
        if start > end {
            return;
        }
        let word = self.surface.layout().pack(color);
        self.surface.fill_row(y as u32, start as u32, end as u32, word);
    }
}

/// Alpha blend a single color channel
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u16;
    ((src as u16 * alpha + dst as u16 * (255 - alpha)) >> 8) as u8
}
