/*
 *  pacer.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Frame pacing against a fixed logical frame rate.
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

use crate::constants::IDLE_SLACK_MILLIS;
use crate::platform::Platform;

/// Gates how often the caller may render and present a frame.
///
/// Two-phase state machine per logical frame: the call after a granted
/// frame measures how long that render took (and always answers "not
/// yet"), subsequent calls wait for the deadline, then the grant opens
/// the next frame. Late frames are never aborted; timing degrades
/// gracefully and [`Pacer::cpu_load`] goes past 100.
pub struct Pacer {
    each_frame_millis: u64,
    next_frame_start: u64,
    last_frame_start: u64,
    last_frame_duration_ms: u64,
    frame_count: i64,
    just_rendered: bool,
}

impl Pacer {
    /// A pacer targeting `rate` frames per second (clamped to at least 1).
    pub fn new(rate: u8) -> Self {
        Self {
            each_frame_millis: 1000 / rate.max(1) as u64,
            next_frame_start: 0,
            last_frame_start: 0,
            last_frame_duration_ms: 0,
            frame_count: -1,
            just_rendered: false,
        }
    }

    #[inline]
    pub fn set_frame_rate(&mut self, rate: u8) {
        self.each_frame_millis = 1000 / rate.max(1) as u64;
    }

    /// Returns true exactly when the caller is authorized to draw and
    /// present one frame; schedules the following deadline when it does.
    ///
    /// While waiting, idle time is yielded to the host only when at least
    /// [`IDLE_SLACK_MILLIS`] remain, so a ~1ms wake granularity cannot
    /// oversleep the deadline.
    pub fn next_frame<P: Platform>(&mut self, platform: &mut P) -> bool {
        let now = platform.millis();

        if self.just_rendered {
            // measure half-step: record the render cost of the frame that
            // was just produced
            self.last_frame_duration_ms = now - self.last_frame_start;
            if self.last_frame_duration_ms > self.each_frame_millis {
                debug!(
                    "frame {} ran long: {}ms of a {}ms budget",
                    self.frame_count, self.last_frame_duration_ms, self.each_frame_millis
                );
            }
            self.just_rendered = false;
            return false;
        }

        if now < self.next_frame_start {
            if self.next_frame_start - now >= IDLE_SLACK_MILLIS {
                platform.idle();
            }
            return false;
        }

        self.just_rendered = true;
        self.last_frame_start = now;
        self.next_frame_start = now + self.each_frame_millis;
        self.frame_count += 1;
        true
    }

    /// Percentage of the frame budget the previous render consumed.
    pub fn cpu_load(&self) -> u64 {
        self.last_frame_duration_ms * 100 / self.each_frame_millis
    }

    /// True on every `frames`-th granted frame; for reduced-rate effects.
    pub fn every_x_frames(&self, frames: u32) -> bool {
        self.frame_count % frames.max(1) as i64 == 0
    }

    /// Granted frames so far; -1 before the first grant.
    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    pub fn last_frame_duration_ms(&self) -> u64 {
        self.last_frame_duration_ms
    }

    pub fn each_frame_millis(&self) -> u64 {
        self.each_frame_millis
    }
}
