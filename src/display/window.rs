//! SDL2 window that presents a `PixelSurface`.
//!
//! The rasterizer never talks to SDL; this is only how the demo host gets
//! pixels on screen. The surface memory is uploaded into a streaming texture
//! whose format matches the surface layout, so no conversion happens.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::surface::PixelSurface;
use crate::color::PixelLayout;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    Resized { width: u32, height: u32 },
}

impl Display {
    /// Create a resizable window with custom resolution and VSync settings
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((Self { canvas, event_pump }, texture_creator))
    }

    /// Upload the surface and flip
    pub fn present<B: AsRef<[u8]> + AsMut<[u8]>>(
        &mut self,
        target: &mut RenderTarget,
        surface: &PixelSurface<B>,
    ) -> Result<(), String> {
        if surface.width() != target.width || surface.height() != target.height {
            return Err(format!(
                "surface is {}x{}, render target {}x{}",
                surface.width(),
                surface.height(),
                target.width,
                target.height
            ));
        }
        target
            .texture
            .update(None, surface.as_bytes(), surface.pitch())
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } if w > 0 && h > 0 => events.push(InputEvent::Resized {
                    width: w as u32,
                    height: h as u32,
                }),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture laid out like a surface with `layout`
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(texture_format(layout), width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

/// SDL packed formats are native-endian words, same as the surface layouts
fn texture_format(layout: PixelLayout) -> PixelFormatEnum {
    match layout {
        PixelLayout::Xrgb8888 => PixelFormatEnum::ARGB8888,
        PixelLayout::Rgbx8888 => PixelFormatEnum::RGBA8888,
    }
}
