//! Colors and their packing into 32-bit framebuffer words

use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Channel order of a packed 32-bit pixel, read as a native-endian `u32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    /// `0xAARRGGBB` (X11 / Linux fbdev / wl_shm XRGB8888)
    #[default]
    Xrgb8888,
    /// `0xRRGGBBAA`
    Rgbx8888,
}

impl PixelLayout {
    /// Raw tag values accepted by `TryFrom<u32>`
    pub const XRGB_8888: u32 = 0;
    pub const RGBX_8888: u32 = 1;

    #[inline]
    pub fn pack(self, c: Color) -> u32 {
        match self {
            PixelLayout::Xrgb8888 => {
                (c.a as u32) << 24 | (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
            },
            PixelLayout::Rgbx8888 => {
                (c.r as u32) << 24 | (c.g as u32) << 16 | (c.b as u32) << 8 | c.a as u32
            },
        }
    }

    #[inline]
    pub fn unpack(self, v: u32) -> Color {
        match self {
            PixelLayout::Xrgb8888 => Color {
                a: (v >> 24) as u8,
                r: (v >> 16) as u8,
                g: (v >> 8) as u8,
                b: v as u8,
            },
            PixelLayout::Rgbx8888 => Color {
                r: (v >> 24) as u8,
                g: (v >> 16) as u8,
                b: (v >> 8) as u8,
                a: v as u8,
            },
        }
    }
}

impl TryFrom<u32> for PixelLayout {
    type Error = RasterError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            PixelLayout::XRGB_8888 => Ok(PixelLayout::Xrgb8888),
            PixelLayout::RGBX_8888 => Ok(PixelLayout::Rgbx8888),
            other => Err(RasterError::UnsupportedLayout(other)),
        }
    }
}

/// Linear interpolation between two channel values, rounded to nearest
#[inline]
pub(crate) fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t + 0.5).clamp(0.0, 255.0) as u8
}

/// Linear interpolation between two colors (all four channels)
#[inline]
pub(crate) fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    Color {
        r: lerp_channel(from.r, to.r, t),
        g: lerp_channel(from.g, to.g, t),
        b: lerp_channel(from.b, to.b, t),
        a: lerp_channel(from.a, to.a, t),
    }
}
