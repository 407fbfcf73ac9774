/*
 *  swap.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Single/double buffer presentation protocol.
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

use log::debug;

use crate::error::DisplayError;
use crate::framebuffer::FrameBuffer;

/// The external presentation boundary.
///
/// `paint_screen` hands a completed packed buffer to the panel and may
/// return before the transfer finishes; `wait_end_of_present` blocks until
/// any in-flight transfer completes. The swap controller always waits
/// before letting a buffer be drawn into or swapped again.
pub trait PresentSink {
    fn paint_screen(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;
    fn wait_end_of_present(&mut self);
}

/// Owns one or two framebuffers and rotates the drawing/presenting roles
/// between them.
///
/// Starts in single-buffer mode: the sole buffer is drawn into and handed
/// to the sink unchanged. After [`DisplaySwap::enable_double_buffer`], each
/// [`DisplaySwap::present`] rotates which slot is active for drawing and
/// which is in flight to the sink, so drawing never touches bytes the sink
/// is still reading.
pub struct DisplaySwap<S: PresentSink> {
    sink: S,
    front: FrameBuffer,
    back: Option<FrameBuffer>,
    // only ever true while `back` is allocated
    active_is_back: bool,
}

impl<S: PresentSink> DisplaySwap<S> {
    /// A single-buffered controller with a zeroed buffer.
    pub fn new(sink: S, width: u32, height: u32) -> Self {
        Self {
            sink,
            front: FrameBuffer::new(width, height),
            back: None,
            active_is_back: false,
        }
    }

    /// Allocates the second buffer and enters double-buffer mode.
    /// Idempotent; the swap buffer is never freed.
    pub fn enable_double_buffer(&mut self) -> Result<(), DisplayError> {
        if self.back.is_none() {
            let (w, h) = (self.front.width() as u32, self.front.height() as u32);
            self.back = Some(FrameBuffer::try_new(w, h)?);
            debug!("double buffering enabled ({}x{})", w, h);
        }
        Ok(())
    }

    pub fn is_double_buffered(&self) -> bool {
        self.back.is_some()
    }

    /// The buffer currently receiving draw operations.
    pub fn active(&self) -> &FrameBuffer {
        match (self.active_is_back, self.back.as_ref()) {
            (true, Some(b)) => b,
            _ => &self.front,
        }
    }

    /// Mutable access to the active buffer; all rasterizer and codec
    /// operations go through this.
    pub fn active_mut(&mut self) -> &mut FrameBuffer {
        match (self.active_is_back, self.back.as_mut()) {
            (true, Some(b)) => b,
            _ => &mut self.front,
        }
    }

    /// In double-buffer mode, the slot last handed to the sink. Single
    /// buffer mode has no separately owned in-flight buffer.
    pub fn in_flight(&self) -> Option<&FrameBuffer> {
        match (self.active_is_back, self.back.as_ref()) {
            (true, Some(_)) => Some(&self.front),
            (false, Some(b)) => Some(b),
            _ => None,
        }
    }

    /// Presents the active buffer.
    ///
    /// Waits out any prior in-flight presentation first. In double-buffer
    /// mode the roles rotate: the buffer just drawn goes to the sink and
    /// the vacated one becomes active for the next frame.
    pub fn present(&mut self) -> Result<(), DisplayError> {
        self.sink.wait_end_of_present();
        match self.back.as_ref() {
            Some(back) => {
                self.active_is_back = !self.active_is_back;
                // the slot no longer active is the one that was just drawn
                let shown = if self.active_is_back { &self.front } else { back };
                self.sink.paint_screen(shown.as_slice())
            }
            None => self.sink.paint_screen(self.front.as_slice()),
        }
    }

    /// [`DisplaySwap::present`], then optionally clear the new active
    /// buffer.
    pub fn present_clear(&mut self, clear_after: bool) -> Result<(), DisplayError> {
        self.present()?;
        if clear_after {
            self.active_mut().clear();
        }
        Ok(())
    }

    /// Blocks until any in-flight presentation completes.
    pub fn wait_end_of_present(&mut self) {
        self.sink.wait_end_of_present();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Recording sink for tests and headless runs, in the spirit of a mock
/// display driver: counts calls and keeps a copy of the last painted
/// frame for inspection.
#[derive(Debug, Default)]
pub struct CaptureSink {
    /// Number of `paint_screen` calls.
    pub frames_painted: usize,
    /// Number of `wait_end_of_present` calls.
    pub waits: usize,
    /// Bytes of the most recently painted frame.
    pub last_frame: Vec<u8>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentSink for CaptureSink {
    fn paint_screen(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        self.frames_painted += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(buffer);
        Ok(())
    }

    fn wait_end_of_present(&mut self) {
        self.waits += 1;
    }
}
