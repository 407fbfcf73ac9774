/*
 *  error.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Unified error type for the display core
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

use thiserror::Error;

/// Unified error type for framebuffer, codec and presentation operations.
///
/// The drawing primitives themselves never fail; coordinates outside the
/// buffer clip silently. Errors are reserved for allocation, malformed
/// compressed assets, and the presentation sink.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The swap buffer could not be allocated.
    #[error("framebuffer allocation failed ({bytes} bytes)")]
    Allocation { bytes: usize },

    /// A compressed bitmap stream ended before producing all of its pixels.
    #[error("compressed bitmap stream truncated at byte {offset}")]
    TruncatedStream { offset: usize },

    /// I/O failure inside a presentation sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Presentation sink failure outside the I/O path.
    #[error("presentation sink error: {0}")]
    Sink(String),
}
