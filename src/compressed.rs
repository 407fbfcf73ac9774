/*
 *  compressed.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Run-length-encoded bitmap decoder. The stream is consumed bit by bit,
 *  least-significant bit of each source byte first: an 8-bit width-1, an
 *  8-bit height-1, one starting-color bit, then runs. Each run is a
 *  unary-coded size selector (every 0-bit widens the length field by 2,
 *  a 1-bit terminates), the length-1 in that many bits, and an implicit
 *  color toggle before the next run.
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
use crate::error::DisplayError;
use crate::framebuffer::FrameBuffer;

/// Bit-level cursor over a compressed bitmap stream.
///
/// Owned by the decode call that creates it, so two decodes can never
/// trample each other's cursor state.
#[derive(Debug)]
pub struct BitReader<'a> {
    src: &'a [u8],
    byte: u8,
    // 0x100 marks the current byte as exhausted
    mask: u16,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, byte: 0, mask: 0x100, pos: 0 }
    }

    /// Reads `count` bits, least-significant first, lazily pulling source
    /// bytes. Errors when the stream runs dry; bits past the low 16 of an
    /// (ill-formed) oversized field are discarded rather than overflowing.
    pub fn next_bits(&mut self, count: u32) -> Result<u16, DisplayError> {
        let mut val: u16 = 0;
        for i in 0..count {
            if self.mask == 0x100 {
                self.byte = *self
                    .src
                    .get(self.pos)
                    .ok_or(DisplayError::TruncatedStream { offset: self.pos })?;
                self.pos += 1;
                self.mask = 0x1;
            }
            if self.byte as u16 & self.mask != 0 && i < 16 {
                val |= 1 << i;
            }
            self.mask <<= 1;
        }
        Ok(val)
    }
}

impl FrameBuffer {
    /// Decodes a compressed bitmap into the buffer at `(sx, sy)`.
    ///
    /// Emitted pixels are packed 8 at a time into a byte accumulator and
    /// written through the same column-major band-splitting path as
    /// [`FrameBuffer::draw_bitmap`], so partially off-screen placement
    /// behaves identically for both codecs. The compressed format only
    /// distinguishes set/clear: `Off` clears, any other color sets.
    pub fn draw_compressed(&mut self, sx: i32, sy: i32, stream: &[u8], color: Color) -> Result<(), DisplayError> {
        let color = if color == Color::Off { Color::Off } else { Color::On };

        let mut reader = BitReader::new(stream);
        let w = reader.next_bits(8)? as i32 + 1;
        let h = reader.next_bits(8)? as i32 + 1;
        let mut col = reader.next_bits(1)?; // starting colour

        let sw = self.w as i32;
        let sh = self.h as i32;
        if sx + w < 0 || sx > sw - 1 || sy + h < 0 || sy > sh - 1 {
            return Ok(());
        }

        let mut y_offset = (sy.abs() % 8) as u32;
        let mut s_row = sy / 8;
        if sy < 0 {
            s_row -= 1;
            y_offset = 8 - y_offset;
        }
        let bands = (h + 7) / 8;

        let mut a = 0;
        let mut i_col = 0;
        let mut byte = 0u8;
        let mut bit = 1u16;

        while a < bands {
            let mut bl = 1;
            while reader.next_bits(1)? == 0 {
                bl += 2;
            }
            let len = reader.next_bits(bl)? as u32 + 1;

            for _ in 0..len {
                if col != 0 {
                    byte |= bit as u8;
                }
                bit <<= 1;

                if bit == 0x100 {
                    // accumulator full: emit one column byte
                    let b_row = s_row + a;
                    if b_row <= sh / 8 - 1
                        && b_row > -2
                        && i_col + sx <= sw - 1
                        && i_col + sx >= 0
                    {
                        self.blit_column_byte(sx + i_col, b_row, byte, y_offset, color);
                    }

                    i_col += 1;
                    if i_col >= w {
                        i_col = 0;
                        a += 1;
                    }
                    byte = 0;
                    bit = 1;
                }
            }

            col = 1 - col; // toggle colour for the next run
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of the documented scheme, used to build well-formed
    /// streams for round-trip checks. Pixel emission order mirrors the
    /// decoder: band by band, column by column, 8 rows per byte.
    struct BitWriter {
        out: Vec<u8>,
        byte: u8,
        mask: u16,
    }

    impl BitWriter {
        fn new() -> Self {
            Self { out: Vec::new(), byte: 0, mask: 1 }
        }

        fn push_bit(&mut self, bit: u16) {
            if bit != 0 {
                self.byte |= self.mask as u8;
            }
            self.mask <<= 1;
            if self.mask == 0x100 {
                self.out.push(self.byte);
                self.byte = 0;
                self.mask = 1;
            }
        }

        fn push_bits(&mut self, val: u32, count: u32) {
            for i in 0..count {
                self.push_bit(((val >> i) & 1) as u16);
            }
        }

        fn finish(mut self) -> Vec<u8> {
            if self.mask != 1 {
                self.out.push(self.byte);
            }
            self.out
        }
    }

    /// Encodes `pixel(x, y) -> 0/1` as a compressed stream. `h` must be a
    /// multiple of 8 (the decoder fills whole bands).
    fn compress(w: usize, h: usize, pixel: impl Fn(usize, usize) -> u16) -> Vec<u8> {
        assert!(h % 8 == 0);
        let mut seq = Vec::with_capacity(w * h);
        for band in 0..h / 8 {
            for x in 0..w {
                for bit in 0..8 {
                    seq.push(pixel(x, band * 8 + bit));
                }
            }
        }

        let mut bw = BitWriter::new();
        bw.push_bits((w - 1) as u32, 8);
        bw.push_bits((h - 1) as u32, 8);
        bw.push_bit(seq[0]);

        let mut idx = 0;
        while idx < seq.len() {
            let cur = seq[idx];
            let mut len = 1;
            while idx + len < seq.len() && seq[idx + len] == cur {
                len += 1;
            }
            // smallest odd field width holding len-1
            let mut bl = 1u32;
            while (len - 1) as u32 >= 1 << bl {
                bl += 2;
            }
            for _ in 0..(bl - 1) / 2 {
                bw.push_bit(0);
            }
            bw.push_bit(1);
            bw.push_bits((len - 1) as u32, bl);
            idx += len;
        }
        bw.finish()
    }

    fn assert_decodes_to(w: usize, h: usize, pixel: impl Fn(usize, usize) -> u16 + Copy) {
        let stream = compress(w, h, pixel);
        let mut fb = FrameBuffer::new(64, 64);
        fb.draw_compressed(0, 0, &stream, Color::On).unwrap();
        for y in 0..h {
            for x in 0..w {
                assert_eq!(fb.get_pixel(x as i32, y as i32) as u16, pixel(x, y), "({x},{y})");
            }
        }
        // nothing outside the image
        for x in 0..64 {
            assert_eq!(fb.get_pixel(x, h as i32), 0);
        }
        for y in 0..64 {
            assert_eq!(fb.get_pixel(w as i32, y), 0);
        }
    }

    #[test]
    fn round_trip_all_one_color() {
        assert_decodes_to(8, 8, |_, _| 1);
        let stream = compress(8, 8, |_, _| 0);
        let mut fb = FrameBuffer::new(64, 64);
        fb.fill(Color::On);
        fb.draw_compressed(0, 0, &stream, Color::Off).unwrap();
        // an all-zero image clears nothing
        assert!(fb.as_slice().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn round_trip_checkerboard() {
        assert_decodes_to(8, 16, |x, y| ((x + y) & 1) as u16);
    }

    #[test]
    fn round_trip_single_long_run() {
        // 16x16 all-set decodes from a single 256-pixel run (9-bit length)
        let stream = compress(16, 16, |_, _| 1);
        assert!(stream.len() < 8, "one run should stay tiny, got {}", stream.len());
        assert_decodes_to(16, 16, |_, _| 1);
    }

    #[test]
    fn round_trip_mixed_runs() {
        // vertical stripes of varying width exercise several selector sizes
        assert_decodes_to(24, 16, |x, _| u16::from(x % 5 < 2));
    }

    #[test]
    fn clear_mode_clears_set_pixels() {
        let stream = compress(8, 8, |x, y| ((x + y) & 1) as u16);
        let mut fb = FrameBuffer::new(16, 16);
        fb.fill(Color::On);
        fb.draw_compressed(0, 0, &stream, Color::Off).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let want = if (x + y) & 1 == 1 { 0 } else { 1 };
                assert_eq!(fb.get_pixel(x, y), want, "({x},{y})");
            }
        }
    }

    #[test]
    fn unaligned_destination_matches_aligned_decode_shifted() {
        let stream = compress(8, 16, |x, y| u16::from((x * 3 + y) % 4 == 0));
        let mut aligned = FrameBuffer::new(32, 32);
        let mut shifted = FrameBuffer::new(32, 32);
        aligned.draw_compressed(0, 0, &stream, Color::On).unwrap();
        shifted.draw_compressed(5, 3, &stream, Color::On).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(
                    shifted.get_pixel(x, y),
                    aligned.get_pixel(x - 5, y - 3),
                    "({x},{y})"
                );
            }
        }
    }

    #[test]
    fn negative_destination_clips_like_the_blitter() {
        let stream = compress(8, 16, |x, y| u16::from((x + y) % 3 != 0));
        let mut aligned = FrameBuffer::new(32, 32);
        let mut clipped = FrameBuffer::new(32, 32);
        aligned.draw_compressed(0, 0, &stream, Color::On).unwrap();
        clipped.draw_compressed(-3, -5, &stream, Color::On).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                let want = if x + 3 < 8 && y + 5 < 16 { aligned.get_pixel(x + 3, y + 5) } else { 0 };
                assert_eq!(clipped.get_pixel(x, y), want, "({x},{y})");
            }
        }
    }

    #[test]
    fn truncated_stream_reports_the_error() {
        let mut stream = compress(16, 16, |x, y| ((x ^ y) & 1) as u16);
        stream.truncate(stream.len() / 2);
        let mut fb = FrameBuffer::new(32, 32);
        let err = fb.draw_compressed(0, 0, &stream, Color::On).unwrap_err();
        assert!(matches!(err, DisplayError::TruncatedStream { .. }));
    }

    #[test]
    fn empty_stream_reports_the_error() {
        let mut fb = FrameBuffer::new(32, 32);
        assert!(fb.draw_compressed(0, 0, &[], Color::On).is_err());
    }

    #[test]
    fn offscreen_decode_consumes_only_the_header() {
        let stream = compress(8, 8, |_, _| 1);
        let mut fb = FrameBuffer::new(32, 32);
        let before = fb.clone();
        fb.draw_compressed(40, 40, &stream, Color::On).unwrap();
        assert_eq!(fb, before);
    }

    #[test]
    fn bit_reader_is_lsb_first() {
        let mut r = BitReader::new(&[0b1010_0110, 0xFF]);
        assert_eq!(r.next_bits(3).unwrap(), 0b110);
        assert_eq!(r.next_bits(5).unwrap(), 0b10100);
        assert_eq!(r.next_bits(8).unwrap(), 0xFF);
        assert!(r.next_bits(1).is_err());
    }
}
