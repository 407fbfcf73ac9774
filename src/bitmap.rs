/*
 *  bitmap.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Uncompressed bitmap blitters. The packed format is column-major:
 *  byte `band * w + col` holds 8 vertically stacked pixels of `col`,
 *  bit 0 topmost.
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

use crate::color::Color;
use crate::framebuffer::FrameBuffer;

impl FrameBuffer {
    /// Writes one source byte (8 vertical pixels) of column `x` into
    /// destination band `b_row`, splitting across two bands when the
    /// destination is not band-aligned (`y_offset != 0`).
    ///
    /// Callers guarantee `0 <= x < width` and `b_row <= bands - 1`; the
    /// partially-visible band guards (`b_row >= 0`, `b_row > -2`) match
    /// the off-screen semantics of the codec paths exactly.
    pub(crate) fn blit_column_byte(&mut self, x: i32, b_row: i32, bits: u8, y_offset: u32, color: Color) {
        let bands = self.h as i32 / 8;
        let col = x as usize;
        if b_row >= 0 {
            let lo = ((bits as u32) << y_offset) as u8;
            let idx = b_row as usize * self.w + col;
            color.apply(&mut self.data[idx], lo);
        }
        if y_offset != 0 && b_row < bands - 1 && b_row > -2 {
            let hi = ((bits as u32) >> (8 - y_offset)) as u8;
            let idx = (b_row + 1) as usize * self.w + col;
            color.apply(&mut self.data[idx], hi);
        }
    }

    /// Blits a column-major packed bitmap. Zero bits leave the destination
    /// untouched; set bits apply `color`. Clips per column and per band;
    /// source bytes past the end of `bitmap` read as zero.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: u32, h: u32, color: Color) {
        let sw = self.w as i32;
        let sh = self.h as i32;
        let (w, h) = (w as i32, h as i32);
        if x + w < 0 || x > sw - 1 || y + h < 0 || y > sh - 1 {
            return;
        }

        let mut y_offset = (y.abs() % 8) as u32;
        let mut s_row = y / 8;
        if y < 0 {
            s_row -= 1;
            y_offset = 8 - y_offset;
        }
        let bands = (h + 7) / 8;

        for a in 0..bands {
            let b_row = s_row + a;
            if b_row > sh / 8 - 1 {
                break;
            }
            if b_row > -2 {
                for i_col in 0..w {
                    if i_col + x > sw - 1 {
                        break;
                    }
                    if i_col + x >= 0 {
                        let bits = bitmap.get((a * w + i_col) as usize).copied().unwrap_or(0);
                        self.blit_column_byte(x + i_col, b_row, bits, y_offset, color);
                    }
                }
            }
        }
    }

    /// Draws a row-major, MSB-first bitmap one pixel at a time. Slower
    /// than [`FrameBuffer::draw_bitmap`] but takes the layout most image
    /// tools emit directly.
    pub fn draw_xy_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: u32, h: u32, color: Color) {
        let sw = self.w as i32;
        let sh = self.h as i32;
        let (w, h) = (w as i32, h as i32);
        if x + w < 0 || x > sw - 1 || y + h < 0 || y > sh - 1 {
            return;
        }

        let byte_width = (w + 7) / 8;
        for yi in 0..h {
            for xi in 0..w {
                let byte = bitmap.get((yi * byte_width + xi / 8) as usize).copied().unwrap_or(0);
                if byte & (0x80 >> (xi & 7)) != 0 {
                    self.draw_pixel(x + xi, y + yi, color);
                }
            }
        }
    }
}
