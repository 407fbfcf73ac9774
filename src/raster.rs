/*
 *  raster.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Line, circle, rectangle and triangle rasterization over the packed
 *  framebuffer. Integer-only Bresenham/midpoint formulations; every
 *  operation clips silently at the buffer edges.
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

use std::mem;

use crate::color::Color;
use crate::framebuffer::FrameBuffer;

/// Corner mask bits for [`FrameBuffer::draw_circle_helper`].
pub const CORNER_UPPER_LEFT: u8 = 0x1;
/// Upper-right quadrant.
pub const CORNER_UPPER_RIGHT: u8 = 0x2;
/// Lower-right quadrant.
pub const CORNER_LOWER_RIGHT: u8 = 0x4;
/// Lower-left quadrant.
pub const CORNER_LOWER_LEFT: u8 = 0x8;

/// Side mask bits for [`FrameBuffer::fill_circle_helper`].
pub const SIDE_RIGHT: u8 = 0x1;
/// Left half.
pub const SIDE_LEFT: u8 = 0x2;

impl FrameBuffer {
    /// Bresenham line between two arbitrary points, any slope. Steep lines
    /// swap the axis roles and swap back only at pixel emission.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, color: Color) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            mem::swap(&mut x0, &mut y0);
            mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            mem::swap(&mut x0, &mut x1);
            mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let mut err = dx / 2;
        let ystep = if y0 < y1 { 1 } else { -1 };

        while x0 <= x1 {
            if steep {
                self.draw_pixel(y0, x0, color);
            } else {
                self.draw_pixel(x0, y0, color);
            }
            err -= dy;
            if err < 0 {
                y0 += ystep;
                err += dx;
            }
            x0 += 1;
        }
    }

    /// Horizontal run. On/Off use one byte-mask loop along the band;
    /// Toggle falls back to the pixel primitive.
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: u32, color: Color) {
        if y < 0 || y >= self.h as i32 {
            return;
        }
        let mut x0 = x;
        let mut x_end = x + w as i32; // last point + 1
        if x_end <= 0 || x0 >= self.w as i32 {
            return;
        }
        if x0 < 0 {
            x0 = 0;
        }
        if x_end > self.w as i32 {
            x_end = self.w as i32;
        }

        let mask = 1u8 << (y & 7);
        let base = (y as usize / 8) * self.w;
        let run = &mut self.data[base + x0 as usize..base + x_end as usize];
        match color {
            Color::On => {
                for b in run {
                    *b |= mask;
                }
            }
            Color::Off => {
                let mask = !mask;
                for b in run {
                    *b &= mask;
                }
            }
            Color::Toggle => {
                for px in x0..x_end {
                    self.draw_pixel(px, y, Color::Toggle);
                }
            }
        }
    }

    /// Vertical run via the pixel primitive.
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: u32, color: Color) {
        let end = y + h as i32;
        for a in y.max(0)..end.min(self.h as i32) {
            self.draw_pixel(x, a, color);
        }
    }

    /// Midpoint circle outline, 8-way mirrored.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        let r = r as i32;
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.draw_pixel(x0, y0 + r, color);
        self.draw_pixel(x0, y0 - r, color);
        self.draw_pixel(x0 + r, y0, color);
        self.draw_pixel(x0 - r, y0, color);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.draw_pixel(x0 + x, y0 + y, color);
            self.draw_pixel(x0 - x, y0 + y, color);
            self.draw_pixel(x0 + x, y0 - y, color);
            self.draw_pixel(x0 - x, y0 - y, color);
            self.draw_pixel(x0 + y, y0 + x, color);
            self.draw_pixel(x0 - y, y0 + x, color);
            self.draw_pixel(x0 + y, y0 - x, color);
            self.draw_pixel(x0 - y, y0 - x, color);
        }
    }

    /// Quadrant-masked circle arcs, used to assemble rounded-rect corners.
    /// `corners` is a bitmask of the `CORNER_*` constants.
    pub fn draw_circle_helper(&mut self, x0: i32, y0: i32, r: u32, corners: u8, color: Color) {
        let r = r as i32;
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if corners & CORNER_LOWER_RIGHT != 0 {
                self.draw_pixel(x0 + x, y0 + y, color);
                self.draw_pixel(x0 + y, y0 + x, color);
            }
            if corners & CORNER_UPPER_RIGHT != 0 {
                self.draw_pixel(x0 + x, y0 - y, color);
                self.draw_pixel(x0 + y, y0 - x, color);
            }
            if corners & CORNER_LOWER_LEFT != 0 {
                self.draw_pixel(x0 - y, y0 + x, color);
                self.draw_pixel(x0 - x, y0 + y, color);
            }
            if corners & CORNER_UPPER_LEFT != 0 {
                self.draw_pixel(x0 - y, y0 - x, color);
                self.draw_pixel(x0 - x, y0 - y, color);
            }
        }
    }

    /// Filled disc.
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        self.draw_fast_vline(x0, y0 - r as i32, 2 * r + 1, color);
        self.fill_circle_helper(x0, y0, r, SIDE_RIGHT | SIDE_LEFT, 0, color);
    }

    /// Side-masked filled half-discs built from vertical runs. `delta`
    /// extends each run downward; rounded-rect fills use it to stretch
    /// the caps over the straight middle section.
    pub fn fill_circle_helper(&mut self, x0: i32, y0: i32, r: u32, sides: u8, delta: i32, color: Color) {
        let r = r as i32;
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if sides & SIDE_RIGHT != 0 {
                self.draw_fast_vline(x0 + x, y0 - y, (2 * y + 1 + delta).max(0) as u32, color);
                self.draw_fast_vline(x0 + y, y0 - x, (2 * x + 1 + delta).max(0) as u32, color);
            }
            if sides & SIDE_LEFT != 0 {
                self.draw_fast_vline(x0 - x, y0 - y, (2 * y + 1 + delta).max(0) as u32, color);
                self.draw_fast_vline(x0 - y, y0 - x, (2 * x + 1 + delta).max(0) as u32, color);
            }
        }
    }

    /// Axis-aligned rectangle outline.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.draw_fast_hline(x, y, w, color);
        self.draw_fast_hline(x, y + h as i32 - 1, w, color);
        self.draw_fast_vline(x, y, h, color);
        self.draw_fast_vline(x + w as i32 - 1, y, h, color);
    }

    /// Filled axis-aligned rectangle, one vertical run per column.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        for i in x..x + w as i32 {
            self.draw_fast_vline(i, y, h, color);
        }
    }

    /// Rounded-rectangle outline. The caller keeps `r <= min(w, h) / 2`.
    pub fn draw_round_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u32, color: Color) {
        let (wi, hi, ri) = (w as i32, h as i32, r as i32);
        let straight_w = (wi - 2 * ri).max(0) as u32;
        let straight_h = (hi - 2 * ri).max(0) as u32;
        self.draw_fast_hline(x + ri, y, straight_w, color); // top
        self.draw_fast_hline(x + ri, y + hi - 1, straight_w, color); // bottom
        self.draw_fast_vline(x, y + ri, straight_h, color); // left
        self.draw_fast_vline(x + wi - 1, y + ri, straight_h, color); // right
        self.draw_circle_helper(x + ri, y + ri, r, CORNER_UPPER_LEFT, color);
        self.draw_circle_helper(x + wi - ri - 1, y + ri, r, CORNER_UPPER_RIGHT, color);
        self.draw_circle_helper(x + wi - ri - 1, y + hi - ri - 1, r, CORNER_LOWER_RIGHT, color);
        self.draw_circle_helper(x + ri, y + hi - ri - 1, r, CORNER_LOWER_LEFT, color);
    }

    /// Filled rounded rectangle: a straight middle band plus two stretched
    /// half-disc caps.
    pub fn fill_round_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u32, color: Color) {
        let (wi, hi, ri) = (w as i32, h as i32, r as i32);
        self.fill_rect(x + ri, y, (wi - 2 * ri).max(0) as u32, h, color);
        let delta = hi - 2 * ri - 1;
        self.fill_circle_helper(x + wi - ri - 1, y + ri, r, SIDE_RIGHT, delta, color);
        self.fill_circle_helper(x + ri, y + ri, r, SIDE_LEFT, delta, color);
    }

    /// Triangle outline.
    pub fn draw_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Scanline-filled triangle: vertices sorted by ascending y, a
    /// flat-bottom upper pass and a flat-top lower pass with integer
    /// incremental edge interpolation.
    pub fn fill_triangle(
        &mut self,
        mut x0: i32, mut y0: i32,
        mut x1: i32, mut y1: i32,
        mut x2: i32, mut y2: i32,
        color: Color,
    ) {
        if y0 > y1 {
            mem::swap(&mut y0, &mut y1);
            mem::swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            mem::swap(&mut y2, &mut y1);
            mem::swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            mem::swap(&mut y0, &mut y1);
            mem::swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            // degenerate: all three on one scanline
            let mut a = x0;
            let mut b = x0;
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            self.draw_fast_hline(a, y0, (b - a + 1) as u32, color);
            return;
        }

        let dx01 = x1 - x0;
        let dy01 = y1 - y0;
        let dx02 = x2 - x0;
        let dy02 = y2 - y0;
        let dx12 = x2 - x1;
        let dy12 = y2 - y1;
        let mut sa = 0;
        let mut sb = 0;

        // If y1 == y2 (flat bottom) the y1 scanline belongs to the first
        // pass and the second loop is skipped, which also avoids the /0 on
        // dy12; otherwise y1 is left for the second pass (avoiding /0 on
        // dy01 when y0 == y1).
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + sa / dy01;
            let mut b = x0 + sb / dy02;
            sa += dx01;
            sb += dx02;
            if a > b {
                mem::swap(&mut a, &mut b);
            }
            self.draw_fast_hline(a, y, (b - a + 1) as u32, color);
            y += 1;
        }

        sa = dx12 * (y - y1);
        sb = dx02 * (y - y0);
        while y <= y2 {
            let mut a = x1 + sa / dy12;
            let mut b = x0 + sb / dy02;
            sa += dx12;
            sb += dx02;
            if a > b {
                mem::swap(&mut a, &mut b);
            }
            self.draw_fast_hline(a, y, (b - a + 1) as u32, color);
            y += 1;
        }
    }
}
