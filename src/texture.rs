//! Source bitmaps for the blitter: font atlases and images.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Content format of a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceFormat {
    /// Four bytes per pixel, R G B A in memory order
    #[default]
    Color,
    /// One coverage byte per pixel (font atlases)
    Alpha8,
}

impl SurfaceFormat {
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            SurfaceFormat::Color => 4,
            SurfaceFormat::Alpha8 => 1,
        }
    }
}

/// A read-only bitmap the blitter samples from
#[derive(Clone)]
pub struct Image {
    width: u32,
    height: u32,
    format: SurfaceFormat,
    pixels: Vec<u8>,
}

impl Image {
    /// Create a new empty (fully transparent) image
    pub fn new(width: u32, height: u32, format: SurfaceFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; width as usize * height as usize * format.bytes_per_pixel()],
        }
    }

    /// Image from raw RGBA data, None if the length does not match
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        Self::from_raw(width, height, SurfaceFormat::Color, data)
    }

    /// Alpha-only image (a baked font atlas), None if the length does not match
    pub fn from_alpha(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        Self::from_raw(width, height, SurfaceFormat::Alpha8, data)
    }

    fn from_raw(width: u32, height: u32, format: SurfaceFormat, data: Vec<u8>) -> Option<Self> {
        if data.len() == width as usize * height as usize * format.bytes_per_pixel() {
            Some(Self {
                width,
                height,
                format,
                pixels: data,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    /// Set a pixel. For Alpha8 images only the alpha is stored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        match self.format {
            SurfaceFormat::Color => {
                self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            },
            SurfaceFormat::Alpha8 => self.pixels[idx] = color.a,
        }
    }

    /// Nearest texel at integer coordinates, None outside the image.
    ///
    /// Alpha8 texels read as white with the coverage as alpha.
    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = self.index(x as u32, y as u32);
        Some(match self.format {
            SurfaceFormat::Color => Color::rgba(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ),
            SurfaceFormat::Alpha8 => Color::WHITE.with_alpha(self.pixels[idx]),
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.format.bytes_per_pixel()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
