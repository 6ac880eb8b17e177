//! Fonts baked into an atlas image, and per-codepoint text drawing.
//!
//! Glyph metrics are in the pixel units the atlas was baked at (`Font::height`
//! pixels tall). Drawing at another size scales them; the glyph bitmaps are
//! stretched nearest-neighbor, there is no hinting or subpixel placement.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Rect;
use crate::texture::Image;

/// Placement and atlas location of one baked glyph
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Glyph {
    /// Bounding box relative to the pen position (y down from the line top)
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Atlas sub-rectangle, normalized to `0..=1`
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    /// Pen advance after this glyph
    pub xadvance: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Font {
    /// Pixel height the glyphs were baked at
    pub height: f32,
    pub glyphs: HashMap<char, Glyph>,
    /// Drawn for codepoints missing from `glyphs`
    #[serde(default)]
    pub fallback: Option<char>,
}

impl Font {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            glyphs: HashMap::new(),
            fallback: None,
        }
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs
            .get(&c)
            .or_else(|| self.fallback.and_then(|f| self.glyphs.get(&f)))
    }

    #[inline]
    fn scale(&self, height: f32) -> f32 {
        if self.height > 0.0 {
            height / self.height
        } else {
            0.0
        }
    }

    /// Width of `text` drawn `height` pixels tall
    pub fn text_width(&self, text: &str, height: f32) -> f32 {
        let scale = self.scale(height);
        text.chars()
            .filter_map(|c| self.glyph(c))
            .map(|g| g.xadvance * scale)
            .sum()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Canvas<B> {
    /// Draw `text` with its line top at `rect.y`, starting at `rect.x`.
    ///
    /// Each glyph's atlas region is stretched onto its scaled box and painted
    /// in `color`. Codepoints the font cannot resolve are skipped.
    pub fn draw_text(
        &mut self,
        atlas: &Image,
        font: &Font,
        rect: Rect,
        text: &str,
        height: f32,
        color: Color,
    ) {
        let scale = font.scale(height);
        let (aw, ah) = (atlas.width() as f32, atlas.height() as f32);

        let mut pen = 0.0;
        for c in text.chars() {
            let Some(g) = font.glyph(c) else {
                continue;
            };

            let src = Rect::new(g.u0 * aw, g.v0 * ah, (g.u1 - g.u0) * aw, (g.v1 - g.v0) * ah);
            let dst = Rect::new(
                pen + g.x0 * scale + rect.x,
                g.y0 * scale + rect.y,
                ((g.x1 - g.x0) * scale).ceil(),
                ((g.y1 - g.y0) * scale).ceil(),
            );
            self.stretch_image(atlas, dst, src, color);

            pen += g.xadvance * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelLayout;
    use crate::display::surface::PixelSurface;
    use crate::texture::SurfaceFormat;

    /// 2-glyph atlas, 4x4 cells: 'A' a solid block, 'B' a hollow box
    fn fixture() -> (Image, Font) {
        let mut atlas = Image::new(8, 4, SurfaceFormat::Alpha8);
        for y in 0..4 {
            for x in 0..4 {
                atlas.set_pixel(x, y, Color::WHITE);
                if x == 0 || y == 0 || x == 3 || y == 3 {
                    atlas.set_pixel(x + 4, y, Color::WHITE);
                }
            }
        }
        let cell = |u0: f32| Glyph {
            x0: 0.0,
            y0: 0.0,
            x1: 4.0,
            y1: 4.0,
            u0,
            v0: 0.0,
            u1: u0 + 0.5,
            v1: 1.0,
            xadvance: 5.0,
        };
        let mut font = Font::new(4.0);
        font.glyphs.insert('A', cell(0.0));
        font.glyphs.insert('B', cell(0.5));
        (atlas, font)
    }

    fn canvas(w: u32, h: u32) -> Canvas {
        let mut c = Canvas::new(PixelSurface::with_size(w, h, PixelLayout::Xrgb8888));
        c.clear(Color::BLACK);
        c
    }

    #[test]
    fn test_text_advances_pen() {
        let (atlas, font) = fixture();
        let mut c = canvas(16, 8);
        let red = Color::rgb(255, 0, 0);
        c.draw_text(&atlas, &font, Rect::new(1.0, 2.0, 16.0, 4.0), "AB", 4.0, red);
        // 'A' solid at x 1..5
        assert_eq!(c.get_pixel(1, 2), Some(red));
        assert_eq!(c.get_pixel(3, 4), Some(red));
        // 'B' hollow at x 6..10
        assert_eq!(c.get_pixel(6, 2), Some(red));
        assert_eq!(c.get_pixel(7, 3), Some(Color::BLACK));
        assert_eq!(c.get_pixel(5, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_text_scales() {
        let (atlas, font) = fixture();
        let mut c = canvas(32, 16);
        c.draw_text(&atlas, &font, Rect::new(0.0, 0.0, 32.0, 8.0), "A", 8.0, Color::WHITE);
        assert_eq!(c.get_pixel(7, 7), Some(Color::WHITE));
        assert_eq!(c.get_pixel(8, 0), Some(Color::BLACK));
        assert_eq!(font.text_width("AB", 8.0), 20.0);
    }

    #[test]
    fn test_missing_glyph_uses_fallback() {
        let (atlas, mut font) = fixture();
        let mut plain = canvas(16, 8);
        plain.draw_text(&atlas, &font, Rect::new(0.0, 0.0, 16.0, 4.0), "?", 4.0, Color::WHITE);
        assert_eq!(plain.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(font.text_width("?", 4.0), 0.0);

        font.fallback = Some('B');
        let mut with_fallback = canvas(16, 8);
        let rect = Rect::new(0.0, 0.0, 16.0, 4.0);
        with_fallback.draw_text(&atlas, &font, rect, "?", 4.0, Color::WHITE);
        assert_eq!(with_fallback.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(with_fallback.get_pixel(1, 1), Some(Color::BLACK));
    }
}
