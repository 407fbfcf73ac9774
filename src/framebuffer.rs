/*
 *  framebuffer.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Packed-bit monochrome framebuffer store
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::color::Color;
use crate::error::DisplayError;

/// A packed 1-bpp framebuffer organized as horizontal bands of 8 pixel
/// rows: byte `x + band * width` carries, at bit `b`, the pixel at
/// `(x, band * 8 + b)`.
///
/// Every addressable `(x, y)` maps to exactly one (byte, bit) pair and all
/// drawing operations clip silently rather than write out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub(crate) data: Vec<u8>,
    pub(crate) w: usize,
    pub(crate) h: usize,
}

impl FrameBuffer {
    /// Creates a zeroed buffer. `height` must be a multiple of 8.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "framebuffer dimensions must be non-zero");
        assert!(height % 8 == 0, "framebuffer height must be a multiple of 8");
        let (w, h) = (width as usize, height as usize);
        Self { data: vec![0u8; w * h / 8], w, h }
    }

    /// Fallible variant of [`FrameBuffer::new`] for on-demand allocation
    /// (the double-buffer path reports failure instead of aborting).
    pub fn try_new(width: u32, height: u32) -> Result<Self, DisplayError> {
        assert!(width > 0 && height > 0, "framebuffer dimensions must be non-zero");
        assert!(height % 8 == 0, "framebuffer height must be a multiple of 8");
        let (w, h) = (width as usize, height as usize);
        let len = w * h / 8;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| DisplayError::Allocation { bytes: len })?;
        data.resize(len, 0);
        Ok(Self { data, w, h })
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    /// Number of 8-row bands.
    pub fn bands(&self) -> usize { self.h / 8 }

    /// Immutable raw access to the packed bytes.
    pub fn as_slice(&self) -> &[u8] { &self.data }

    /// Mutable raw access (useful for pushing regions to a panel).
    pub fn as_mut_slice(&mut self) -> &mut [u8] { &mut self.data }

    /// Zeroes the buffer.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fills the whole buffer with one color; `Toggle` inverts every pixel.
    pub fn fill(&mut self, color: Color) {
        match color {
            Color::On => self.data.fill(0xFF),
            Color::Off => self.data.fill(0x00),
            Color::Toggle => {
                for b in &mut self.data {
                    *b = !*b;
                }
            }
        }
    }

    /// Single-pixel read-modify-write. Out-of-bounds coordinates are a
    /// silent no-op.
    #[inline]
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= self.w as i32 || y < 0 || y >= self.h as i32 {
            return;
        }
        let idx = x as usize + (y as usize / 8) * self.w;
        color.apply(&mut self.data[idx], 1 << (y as usize & 7));
    }

    /// Returns 1 if the pixel is set, 0 if clear or out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || x >= self.w as i32 || y < 0 || y >= self.h as i32 {
            return 0;
        }
        let idx = x as usize + (y as usize / 8) * self.w;
        (self.data[idx] >> (y as usize & 7)) & 1
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

/// embedded-graphics interop: lets ecosystem primitives, fonts and images
/// render straight into the packed buffer.
impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.draw_pixel(p.x, p.y, Color::from(c));
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(Color::from(color));
        Ok(())
    }
}
