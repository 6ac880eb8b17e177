use log::info;

use crate::color::{Color, PixelLayout};
use crate::error::{RasterError, Result};

const BYTES_PER_PIXEL: usize = 4;

// ============================================================================
// PixelSurface
// ============================================================================

/// 32-bit pixel memory owned by the caller.
///
/// `B` is whatever hands out the bytes: a `Vec<u8>`, a `&mut [u8]` over a
/// memory-mapped framebuffer, a shm pool slice. The surface only ever writes
/// into it and never reallocates; `replace` is how a resize happens.
pub struct PixelSurface<B = Vec<u8>> {
    pixels: B,
    width: u32,
    height: u32,
    pitch: usize,
    layout: PixelLayout,
}

impl PixelSurface<Vec<u8>> {
    /// Allocate a tightly packed, zeroed surface
    pub fn with_size(width: u32, height: u32, layout: PixelLayout) -> Self {
        let pitch = width as usize * BYTES_PER_PIXEL;
        Self {
            pixels: vec![0; pitch * height as usize],
            width,
            height,
            pitch,
            layout,
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PixelSurface<B> {
    /// Wrap caller memory. Fails if the pitch or the buffer cannot hold
    /// `width x height` pixels.
    pub fn new(
        pixels: B,
        width: u32,
        height: u32,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<Self> {
        validate(pixels.as_ref().len(), width, height, pitch)?;
        info!(
            "Pixel surface {}x{} pitch {} layout {:?}",
            width, height, pitch, layout
        );
        Ok(Self {
            pixels,
            width,
            height,
            pitch,
            layout,
        })
    }

    /// Like [`PixelSurface::new`] but with the layout given as a raw tag, the
    /// way a C host or a device descriptor reports it
    pub fn from_raw_layout(
        pixels: B,
        width: u32,
        height: u32,
        pitch: usize,
        layout: u32,
    ) -> Result<Self> {
        let layout = PixelLayout::try_from(layout)?;
        Self::new(pixels, width, height, pitch, layout)
    }

    /// Swap in new memory and geometry (window resize, new mmap).
    /// Returns the previous memory. On error the surface is unchanged.
    pub fn replace(
        &mut self,
        pixels: B,
        width: u32,
        height: u32,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<B> {
        validate(pixels.as_ref().len(), width, height, pitch)?;
        info!(
            "Pixel surface replaced: {}x{} -> {}x{} pitch {}",
            self.width, self.height, width, height, pitch
        );
        self.width = width;
        self.height = height;
        self.pitch = pitch;
        self.layout = layout;
        Ok(std::mem::replace(&mut self.pixels, pixels))
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
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.pitch + x as usize * BYTES_PER_PIXEL
    }

    /// Read the packed word at (x, y). Caller has bounds-checked.
    #[inline]
    pub(crate) fn read_word(&self, x: u32, y: u32) -> u32 {
        let idx = self.pixel_index(x, y);
        let bytes = &self.pixels.as_ref()[idx..idx + BYTES_PER_PIXEL];
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Write a packed word at (x, y). Caller has bounds-checked.
    #[inline]
    pub(crate) fn write_word(&mut self, x: u32, y: u32, word: u32) {
        let idx = self.pixel_index(x, y);
        self.pixels.as_mut()[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&word.to_ne_bytes());
    }

    /// Fill `x0..=x1` on row `y` with one packed word. Caller has clipped.
    #[inline]
    pub(crate) fn fill_row(&mut self, y: u32, x0: u32, x1: u32, word: u32) {
        let start = self.pixel_index(x0, y);
        let end = self.pixel_index(x1, y) + BYTES_PER_PIXEL;
        let row = &mut self.pixels.as_mut()[start..end];
        let ptr = row.as_mut_ptr() as *mut u32;
        let len = row.len() / BYTES_PER_PIXEL;
        for i in 0..len {
            // Safety: i < len keeps every write inside `row`; the framebuffer
            // may not be u32-aligned so the write is unaligned.
            unsafe {
                ptr.add(i).write_unaligned(word);
            }
        }
    }

    /// Decoded color at (x, y), None outside the surface
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(self.layout.unpack(self.read_word(x as u32, y as u32)))
        } else {
            None
        }
    }

    /// Fill every pixel with `color`, ignoring any clip rectangle
    pub fn clear(&mut self, color: Color) {
        if self.width == 0 {
            return;
        }
        let word = self.layout.pack(color);
        for y in 0..self.height {
            self.fill_row(y, 0, self.width - 1, word);
        }
    }

    /// Raw bytes, e.g. for uploading to a presentation texture
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_ref()
    }

    /// Give the memory back to the caller
    pub fn into_inner(self) -> B {
        self.pixels
    }
}

fn validate(len: usize, width: u32, height: u32, pitch: usize) -> Result<()> {
    let row = width as usize * BYTES_PER_PIXEL;
    if pitch < row {
        return Err(RasterError::PitchTooSmall { pitch, min: row });
    }
    let required = if height == 0 {
        0
    } else {
        pitch * (height as usize - 1) + row
    };
    if len < required {
        return Err(RasterError::BufferTooSmall { len, required });
    }
    Ok(())
}

// ============================================================================
// Scissor
// ============================================================================

/// Half-open clip rectangle `[left, right) x [top, bottom)`, always inside the
/// surface it was clamped against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScissorRect {
    /// The whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        }
    }

    /// Scissor from an `x, y, w, h` request, clamped to a `width x height`
    /// surface. Negative sizes collapse to an empty rectangle.
    pub fn clamped(x: i32, y: i32, w: i32, h: i32, width: u32, height: u32) -> Self {
        let (sw, sh) = (width as i32, height as i32);
        let left = x.clamp(0, sw);
        let top = y.clamp(0, sh);
        Self {
            left,
            top,
            right: x.saturating_add(w).clamp(left, sw),
            bottom: y.saturating_add(h).clamp(top, sh),
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}
