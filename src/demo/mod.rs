//! Demo scene: builds one frame of commands exercising every primitive,
//! the way a GUI library would emit them.

pub mod font5x7;
pub mod util;

use std::f32::consts::TAU;

use rawfb::{Color, Command, FontId, Frame, Image, ImageId, SurfaceFormat, Vec2i};

use util::hsv;

const PANEL: Color = Color::rgb(45, 45, 48);
const BORDER: Color = Color::rgb(120, 120, 130);
const LABEL: Color = Color::rgb(220, 220, 220);

#[inline]
fn v(x: f32, y: f32) -> Vec2i {
    Vec2i::new(x as i16, y as i16)
}

/// 8x8 RGBA checkerboard with a translucent half, for the image commands
pub fn checker_image() -> Image {
    let mut img = Image::new(8, 8, SurfaceFormat::Color);
    for y in 0..8 {
        for x in 0..8 {
            let on = (x + y) % 2 == 0;
            let base = if on { Color::rgb(230, 80, 60) } else { Color::rgb(40, 160, 220) };
            let alpha = if y < 4 { 255 } else { 128 };
            img.set_pixel(x, y, base.with_alpha(alpha));
        }
    }
    img
}

fn panel(frame: &mut Frame, font: FontId, x: i16, y: i16, w: u16, h: u16, title: &str) {
    frame.push(Command::RectFilled {
        x,
        y,
        w,
        h,
        rounding: 6,
        color: PANEL,
    });
    frame.push(Command::Rect {
        x,
        y,
        w,
        h,
        rounding: 6,
        thickness: 1,
        color: BORDER,
    });
    label(frame, font, x + 8, y + 6, title, 8.0, LABEL);
}

fn label(frame: &mut Frame, font: FontId, x: i16, y: i16, text: &str, height: f32, color: Color) {
    frame.push(Command::Text {
        font,
        x,
        y,
        w: (text.len() as f32 * height) as u16,
        h: height as u16,
        height,
        background: Color::TRANSPARENT,
        foreground: color,
        string: text.to_string(),
    });
}

/// One frame of the showcase at time `t` seconds
pub fn showcase(
    t: f32,
    width: u32,
    height: u32,
    font: FontId,
    image: ImageId,
    status: &str,
) -> Frame {
    let mut frame = Frame::new();
    let (sw, sh) = (width.min(i16::MAX as u32) as u16, height.min(i16::MAX as u32) as u16);
    let hue = t * 30.0;

    // Header gradient
    frame.push(Command::RectMultiColor {
        x: 0,
        y: 0,
        w: sw,
        h: 28,
        top_left: hsv(hue, 0.7, 0.8),
        top_right: hsv(hue + 90.0, 0.7, 0.8),
        bottom_right: hsv(hue + 180.0, 0.7, 0.4),
        bottom_left: hsv(hue + 270.0, 0.7, 0.4),
    });
    label(&mut frame, font, 10, 6, "RAWFB SOFTWARE RASTERIZER", 16.0, Color::WHITE);

    // Shapes
    panel(&mut frame, font, 10, 40, 200, 180, "SHAPES");
    frame.push(Command::Circle {
        x: 20,
        y: 64,
        w: 50,
        h: 50,
        thickness: 1,
        color: hsv(hue, 0.6, 1.0),
    });
    frame.push(Command::CircleFilled {
        x: 80,
        y: 64,
        w: 60,
        h: 40,
        color: hsv(hue + 60.0, 0.6, 1.0),
    });
    frame.push(Command::RectFilled {
        x: 150,
        y: 64,
        w: 50,
        h: 50,
        rounding: 0,
        color: Color::rgb(200, 200, 60),
    });
    let wobble = (t * 2.0).sin() * 20.0;
    frame.push(Command::TriangleFilled {
        a: v(30.0, 200.0),
        b: v(90.0, 200.0),
        c: v(60.0 + wobble, 130.0),
        color: hsv(hue + 120.0, 0.6, 0.9),
    });
    frame.push(Command::Triangle {
        a: v(110.0, 200.0),
        b: v(190.0, 200.0),
        c: v(150.0 - wobble, 130.0),
        thickness: 2,
        color: LABEL,
    });
    frame.push(Command::Line {
        begin: v(20.0, 124.0),
        end: v(200.0, 124.0),
        thickness: 1,
        color: BORDER,
    });

    // Paths
    panel(&mut frame, font, 220, 40, 200, 180, "PATHS");
    let star: Vec<Vec2i> = (0..10)
        .map(|i| {
            let a = t + i as f32 * TAU / 10.0;
            let r = if i % 2 == 0 { 45.0 } else { 20.0 };
            v(320.0 + a.cos() * r, 110.0 + a.sin() * r)
        })
        .collect();
    frame.push(Command::PolygonFilled {
        points: star.clone(),
        color: hsv(hue + 200.0, 0.5, 0.9),
    });
    frame.push(Command::Polygon {
        points: star,
        thickness: 1,
        color: Color::WHITE,
    });
    let wave: Vec<Vec2i> = (0..=36)
        .map(|i| {
            let x = 230.0 + i as f32 * 5.0;
            v(x, 190.0 + (t * 3.0 + i as f32 * 0.4).sin() * 14.0)
        })
        .collect();
    frame.push(Command::Polyline {
        points: wave,
        thickness: 2,
        color: Color::rgb(90, 220, 120),
    });

    // Curves and images
    panel(&mut frame, font, 430, 40, 200, 180, "CURVES / IMAGES");
    let swing = (t * 1.5).cos() * 60.0;
    frame.push(Command::Curve {
        begin: v(440.0, 120.0),
        ctrl: [v(480.0, 60.0 + swing), v(580.0, 180.0 - swing)],
        end: v(620.0, 70.0),
        thickness: 1,
        color: Color::rgb(250, 170, 60),
    });
    frame.push(Command::Image {
        image,
        region: None,
        x: 440,
        y: 140,
        w: 64,
        h: 64,
        color: Color::WHITE,
    });
    frame.push(Command::Image {
        image,
        region: Some([0, 0, 2, 2]),
        x: 520,
        y: 140,
        w: 64,
        h: 64,
        color: Color::WHITE,
    });

    // Clipping
    panel(&mut frame, font, 10, 230, 300, 120, "SCISSOR");
    frame.push(Command::Scissor {
        x: 14,
        y: 248,
        w: 292,
        h: 98,
    });
    let cx = 160.0 + (t * 0.8).sin() * 150.0;
    frame.push(Command::CircleFilled {
        x: (cx - 60.0) as i16,
        y: 240,
        w: 120,
        h: 120,
        color: hsv(hue + 300.0, 0.6, 0.9),
    });
    frame.push(Command::Scissor { x: 0, y: 0, w: sw, h: sh });

    // Declared by GUI toolkits, not rasterized here
    frame.push(Command::Arc {
        cx: 470,
        cy: 290,
        r: 40,
        thickness: 1,
        a: [0.0, TAU * 0.75],
        color: Color::WHITE,
    });

    let status_y = (sh as i16).saturating_sub(16);
    label(&mut frame, font, 10, status_y, status, 8.0, Color::rgb(255, 255, 0));
    frame
}
