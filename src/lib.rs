/*
 *  lib.rs
 *
 *  PixelPod - small screen, steady frames
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

//! Graphics and frame-pacing core for pocket-sized monochrome displays.
//!
//! The pieces, leaf first: a packed 1-bpp [`FrameBuffer`] store with
//! pixel/line/shape rasterization and two bitmap codecs (a column-major
//! blitter and an RLE bitstream decoder), a [`DisplaySwap`] controller
//! managing single/double buffering against a [`PresentSink`], and a
//! [`Pacer`] gating the render loop against a fixed logical frame rate
//! while yielding idle time to the host.
//!
//! A driving loop looks like:
//!
//! ```no_run
//! use pixelpod::{Color, DisplaySwap, HostPlatform, Pacer, CaptureSink};
//! use pixelpod::constants::{DEFAULT_FRAME_RATE, DISPLAY_WIDTH, DISPLAY_HEIGHT};
//!
//! let mut platform = HostPlatform::new();
//! let mut display = DisplaySwap::new(CaptureSink::new(), DISPLAY_WIDTH, DISPLAY_HEIGHT);
//! let mut pacer = Pacer::new(DEFAULT_FRAME_RATE);
//! loop {
//!     if !pacer.next_frame(&mut platform) {
//!         continue;
//!     }
//!     let fb = display.active_mut();
//!     fb.clear();
//!     fb.fill_circle(64, 32, 10, Color::On);
//!     display.present().unwrap();
//! }
//! ```

pub mod boot;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod framebuffer;
pub mod geom;
pub mod pacer;
pub mod platform;
pub mod swap;

mod bitmap;
pub mod compressed;
mod raster;

pub use color::Color;
pub use compressed::BitReader;
pub use error::DisplayError;
pub use framebuffer::FrameBuffer;
pub use geom::{Point, Rect};
pub use pacer::Pacer;
pub use platform::{Clock, HostPlatform, Platform, ScriptedPlatform};
pub use swap::{CaptureSink, DisplaySwap, PresentSink};
