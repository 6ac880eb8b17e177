use super::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Rect;
use crate::texture::{Image, SurfaceFormat};

impl<B: AsRef<[u8]> + AsMut<[u8]>> Canvas<B> {
    /// Nearest-neighbor blit of `src` (a region of `image`) onto `dst`.
    ///
    /// Alpha8 images are coverage masks painted in `tint`; color images keep
    /// their own RGB and alpha. Every pixel goes through `blend_pixel`.
    /// Source texels outside the image are skipped.
    pub fn stretch_image(&mut self, image: &Image, dst: Rect, src: Rect, tint: Color) {
        if !(dst.w > 0.0 && dst.h > 0.0) {
            return;
        }
        let xinc = src.w / dst.w;
        let yinc = src.h / dst.h;

        let ox = (dst.x + 0.5).floor() as i32;
        let oy = (dst.y + 0.5).floor() as i32;
        let w = dst.w as i32;
        let h = dst.h as i32;

        // Only walk the part of the destination the scissor lets through
        let s = self.scissor();
        let i_start = s.left.saturating_sub(ox).max(0);
        let i_end = s.right.saturating_sub(ox).min(w);
        let j_start = s.top.saturating_sub(oy).max(0);
        let j_end = s.bottom.saturating_sub(oy).min(h);

        for j in j_start..j_end {
            let sy = (src.y + j as f32 * yinc).floor() as i32;
            for i in i_start..i_end {
                let sx = (src.x + i as f32 * xinc).floor() as i32;
                let Some(texel) = image.texel(sx, sy) else {
                    continue;
                };
                let color = match image.format() {
                    SurfaceFormat::Alpha8 => tint.with_alpha(texel.a),
                    SurfaceFormat::Color => texel,
                };
                self.blend_pixel(ox + i, oy + j, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelLayout;
    use crate::display::surface::PixelSurface;

    fn canvas(w: u32, h: u32) -> Canvas {
        let mut c = Canvas::new(PixelSurface::with_size(w, h, PixelLayout::Xrgb8888));
        c.clear(Color::BLACK);
        c
    }

    fn checker() -> Image {
        // 2x2: opaque red, green / blue, transparent
        Image::from_rgba(
            2,
            2,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 9, 9, 9, 0],
        )
        .expect("2x2 rgba")
    }

    #[test]
    fn test_one_to_one_copy() {
        let mut c = canvas(4, 4);
        c.stretch_image(
            &checker(),
            Rect::new(1.0, 1.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Color::WHITE,
        );
        assert_eq!(c.get_pixel(1, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(c.get_pixel(2, 1), Some(Color::rgb(0, 255, 0)));
        assert_eq!(c.get_pixel(1, 2), Some(Color::rgb(0, 0, 255)));
        // transparent texel leaves the destination alone
        assert_eq!(c.get_pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_upscale_nearest() {
        let mut c = canvas(8, 8);
        c.stretch_image(
            &checker(),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Color::WHITE,
        );
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(c.get_pixel(x, y), Some(Color::rgb(255, 0, 0)));
        }
        assert_eq!(c.get_pixel(3, 0), Some(Color::rgb(0, 255, 0)));
        assert_eq!(c.get_pixel(0, 3), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_alpha_mask_takes_tint() {
        let mut c = canvas(2, 1);
        let mask = Image::from_alpha(2, 1, vec![255, 0]).expect("2x1 alpha");
        let tint = Color::rgb(10, 200, 30);
        let full = Rect::new(0.0, 0.0, 2.0, 1.0);
        c.stretch_image(&mask, full, full, tint);
        assert_eq!(c.get_pixel(0, 0), Some(tint));
        assert_eq!(c.get_pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_destination_origin_rounds() {
        let mut c = canvas(4, 1);
        let mask = Image::from_alpha(1, 1, vec![255]).expect("1x1 alpha");
        let src = Rect::new(0.0, 0.0, 1.0, 1.0);
        c.stretch_image(&mask, Rect::new(1.6, 0.0, 1.0, 1.0), src, Color::WHITE);
        assert_eq!(c.get_pixel(2, 0), Some(Color::WHITE));
        assert_eq!(c.get_pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_blit_clipped_by_scissor() {
        let mut c = canvas(6, 6);
        c.set_scissor(2, 2, 2, 2);
        let solid = Image::from_alpha(1, 1, vec![255]).expect("1x1 alpha");
        let src = Rect::new(0.0, 0.0, 1.0, 1.0);
        c.stretch_image(&solid, Rect::new(0.0, 0.0, 6.0, 6.0), src, Color::WHITE);
        for y in 0..6 {
            for x in 0..6 {
                let inside = (2..4).contains(&x) && (2..4).contains(&y);
                let expected = if inside { Color::WHITE } else { Color::BLACK };
                assert_eq!(c.get_pixel(x, y), Some(expected), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_empty_destination() {
        let mut c = canvas(2, 2);
        let solid = Image::from_alpha(1, 1, vec![255]).expect("1x1 alpha");
        let src = Rect::new(0.0, 0.0, 1.0, 1.0);
        c.stretch_image(&solid, Rect::new(0.0, 0.0, 0.0, 2.0), src, Color::WHITE);
        c.stretch_image(&solid, Rect::new(0.0, 0.0, f32::NAN, 2.0), src, Color::WHITE);
        assert_eq!(c.get_pixel(0, 0), Some(Color::BLACK));
    }
}
