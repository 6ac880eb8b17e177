//! Command stream interpreter: walks a frame's commands and drives the canvas.

use std::collections::HashMap;

use log::{debug, info, trace};

use crate::color::{Color, PixelLayout};
use crate::command::{Command, FontId, Frame, ImageId, Vec2i};
use crate::config::RenderConfig;
use crate::display::{Canvas, Font, PixelSurface};
use crate::error::Result;
use crate::geometry::{Point2I, Rect};
use crate::texture::Image;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Between frames
    Idle,
    /// Inside `render`, walking the command list
    Dispatching,
}

/// What happened to a frame's commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Commands that were rasterized or changed the scissor
    pub drawn: usize,
    /// `NoOp` and `Custom`, nothing to rasterize
    pub ignored: usize,
    /// Arcs, recognized but not rasterized by this backend
    pub unsupported: usize,
    /// Text/Image commands whose font or image is not registered
    pub skipped: usize,
}

enum Outcome {
    Drawn,
    Ignored,
    Unsupported,
    Skipped,
}

/// One render target: a canvas plus the fonts and images commands refer to.
///
/// Each renderer owns its own surface and scissor, so several can run side
/// by side.
pub struct Renderer<B = Vec<u8>> {
    canvas: Canvas<B>,
    config: RenderConfig,
    state: RenderState,
    atlas: Option<Image>,
    fonts: HashMap<FontId, Font>,
    images: HashMap<ImageId, Image>,
    next_font: u32,
    next_image: u32,
    // Scratch buffer for point lists (reused per command)
    points: Vec<Point2I>,
}

impl Renderer<Vec<u8>> {
    /// Renderer over a freshly allocated surface in `config.layout`
    pub fn with_size(width: u32, height: u32, config: RenderConfig) -> Self {
        let surface = PixelSurface::with_size(width, height, config.layout);
        Self::new(surface, config)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Renderer<B> {
    pub fn new(surface: PixelSurface<B>, config: RenderConfig) -> Self {
        info!(
            "Renderer on {}x{} {:?} surface (thick lines: {}, curve segments: {})",
            surface.width(),
            surface.height(),
            surface.layout(),
            config.thick_lines,
            config.curve_segments
        );
        let mut canvas = Canvas::new(surface);
        canvas.set_thick_lines(config.thick_lines);
        Self {
            canvas,
            config,
            state: RenderState::Idle,
            atlas: None,
            fonts: HashMap::new(),
            images: HashMap::new(),
            next_font: 0,
            next_image: 0,
            points: Vec::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn surface(&self) -> &PixelSurface<B> {
        self.canvas.surface()
    }

    /// Direct drawing access between frames
    pub fn canvas_mut(&mut self) -> &mut Canvas<B> {
        &mut self.canvas
    }

    pub fn into_surface(self) -> PixelSurface<B> {
        self.canvas.into_surface()
    }

    /// The atlas every registered font's glyph UVs point into
    pub fn set_font_atlas(&mut self, atlas: Image) {
        info!(
            "Font atlas {}x{} {:?}",
            atlas.width(),
            atlas.height(),
            atlas.format()
        );
        self.atlas = Some(atlas);
    }

    pub fn add_font(&mut self, font: Font) -> FontId {
        let id = FontId(self.next_font);
        self.next_font += 1;
        debug!("Font {:?}: {} glyphs at {}px", id, font.glyphs.len(), font.height);
        self.fonts.insert(id, font);
        id
    }

    pub fn add_image(&mut self, image: Image) -> ImageId {
        let id = ImageId(self.next_image);
        self.next_image += 1;
        debug!("Image {:?}: {:?}", id, image);
        self.images.insert(id, image);
        id
    }

    /// Replace the pixel memory (window resize, new mapping). The scissor is
    /// reset to the new bounds. Returns the old memory.
    pub fn resize(
        &mut self,
        pixels: B,
        width: u32,
        height: u32,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<B> {
        self.canvas.replace_surface(pixels, width, height, pitch, layout)
    }

    /// Fill the whole surface with one color
    pub fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    /// Draw every command of `frame` in order.
    ///
    /// The scissor starts out as the whole surface. The surface is cleared
    /// first with `clear`, or with the configured clear color when
    /// `clear_each_frame` is set.
    pub fn render(&mut self, frame: &Frame, clear: Option<Color>) -> FrameStats {
        self.state = RenderState::Dispatching;
        self.canvas.reset_scissor();

        let clear = clear.or(self.config.clear_each_frame.then_some(self.config.clear_color));
        if let Some(color) = clear {
            self.canvas.clear(color);
        }

        let mut stats = FrameStats::default();
        for command in &frame.commands {
            match self.dispatch(command) {
                Outcome::Drawn => stats.drawn += 1,
                Outcome::Ignored => stats.ignored += 1,
                Outcome::Unsupported => stats.unsupported += 1,
                Outcome::Skipped => stats.skipped += 1,
            }
        }

        if stats.unsupported > 0 {
            trace!("{} arc commands not rasterized", stats.unsupported);
        }
        debug!(
            "Frame: {} commands, {} drawn, {} ignored, {} skipped",
            frame.len(),
            stats.drawn,
            stats.ignored + stats.unsupported,
            stats.skipped
        );

        self.state = RenderState::Idle;
        stats
    }

    fn dispatch(&mut self, command: &Command) -> Outcome {
        let canvas = &mut self.canvas;
        match command {
            Command::NoOp | Command::Custom { .. } => return Outcome::Ignored,
            Command::Arc { .. } | Command::ArcFilled { .. } => return Outcome::Unsupported,
            Command::Scissor { x, y, w, h } => {
                canvas.set_scissor(*x as i32, *y as i32, *w as i32, *h as i32);
            },
            Command::Line {
                begin,
                end,
                thickness,
                color,
            } => canvas.line((*begin).into(), (*end).into(), *thickness, *color),
            Command::Rect {
                x,
                y,
                w,
                h,
                rounding,
                thickness,
                color,
            } => canvas.stroke_rect(
                *x as i32,
                *y as i32,
                *w as i32,
                *h as i32,
                *rounding as i32,
                *thickness,
                *color,
            ),
            Command::RectFilled {
                x,
                y,
                w,
                h,
                rounding,
                color,
            } => canvas.fill_rect(
                *x as i32,
                *y as i32,
                *w as i32,
                *h as i32,
                *rounding as i32,
                *color,
            ),
            Command::RectMultiColor {
                x,
                y,
                w,
                h,
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => canvas.fill_rect_multi_color(
                *x as i32,
                *y as i32,
                *w as i32,
                *h as i32,
                *top_left,
                *top_right,
                *bottom_right,
                *bottom_left,
            ),
            Command::Circle { x, y, w, h, color, .. } => {
                canvas.stroke_ellipse(*x as i32, *y as i32, *w as i32, *h as i32, *color);
            },
            Command::CircleFilled { x, y, w, h, color } => {
                canvas.fill_ellipse(*x as i32, *y as i32, *w as i32, *h as i32, *color);
            },
            Command::Triangle {
                a,
                b,
                c,
                thickness,
                color,
            } => canvas.stroke_triangle((*a).into(), (*b).into(), (*c).into(), *thickness, *color),
            Command::TriangleFilled { a, b, c, color } => {
                canvas.fill_triangle((*a).into(), (*b).into(), (*c).into(), *color);
            },
            Command::Polygon {
                points,
                thickness,
                color,
            } => {
                fill_points(&mut self.points, points);
                canvas.stroke_polygon(&self.points, *thickness, *color);
            },
            Command::PolygonFilled { points, color } => {
                fill_points(&mut self.points, points);
                canvas.fill_polygon(&self.points, *color);
            },
            Command::Polyline {
                points,
                thickness,
                color,
            } => {
                fill_points(&mut self.points, points);
                canvas.stroke_polyline(&self.points, *thickness, *color);
            },
            Command::Curve {
                begin,
                ctrl,
                end,
                thickness,
                color,
            } => canvas.stroke_curve(
                (*begin).into(),
                ctrl[0].into(),
                ctrl[1].into(),
                (*end).into(),
                self.config.curve_segments,
                *thickness,
                *color,
            ),
            Command::Text {
                font,
                x,
                y,
                w,
                h,
                height,
                foreground,
                string,
                ..
            } => {
                let (Some(atlas), Some(f)) = (self.atlas.as_ref(), self.fonts.get(font)) else {
                    debug!("Text with unresolved font {:?} skipped", font);
                    return Outcome::Skipped;
                };
                let rect = Rect::new(*x as f32, *y as f32, *w as f32, *h as f32);
                canvas.draw_text(atlas, f, rect, string, *height, *foreground);
            },
            Command::Image {
                image,
                region,
                x,
                y,
                w,
                h,
                color,
            } => {
                let Some(img) = self.images.get(image) else {
                    debug!("Image {:?} not registered, skipped", image);
                    return Outcome::Skipped;
                };
                let src = match region {
                    Some([rx, ry, rw, rh]) => {
                        Rect::new(*rx as f32, *ry as f32, *rw as f32, *rh as f32)
                    },
                    None => Rect::new(0.0, 0.0, img.width() as f32, img.height() as f32),
                };
                let dst = Rect::new(*x as f32, *y as f32, *w as f32, *h as f32);
                canvas.stretch_image(img, dst, src, *color);
            },
        }
        Outcome::Drawn
    }
}

fn fill_points(buf: &mut Vec<Point2I>, points: &[Vec2i]) {
    buf.clear();
    buf.extend(points.iter().map(|&p| Point2I::from(p)));
}
