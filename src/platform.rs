/*
 *  platform.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Host platform boundary: monotonic clock, idle yielding and delays.
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

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic milliseconds-since-start reader.
pub trait Clock {
    fn millis(&self) -> u64;
}

/// The host facilities the frame pacer and boot animation consume beyond
/// the clock: ceding CPU until the next periodic host tick (~1ms, no exact
/// wake guarantee) and plain delays.
pub trait Platform: Clock {
    /// Yields until the host's next periodic tick.
    fn idle(&mut self);

    /// Blocks for roughly `ms` milliseconds.
    fn delay_millis(&mut self, ms: u64);
}

/// Production platform backed by `Instant` and `thread::sleep`.
pub struct HostPlatform {
    epoch: Instant,
}

impl HostPlatform {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for HostPlatform {
    fn millis(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

impl Platform for HostPlatform {
    fn idle(&mut self) {
        // the closest std analogue of "sleep until the next timer tick"
        thread::sleep(Duration::from_millis(1));
    }

    fn delay_millis(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Deterministic platform for tests: serves a scripted sequence of clock
/// readings (repeating the last one once exhausted) and counts idle and
/// delay calls instead of sleeping.
pub struct ScriptedPlatform {
    times: Vec<u64>,
    cursor: Cell<usize>,
    /// Number of `idle()` calls observed.
    pub idle_calls: usize,
    /// Sum of all `delay_millis` durations observed.
    pub delayed_millis: u64,
}

impl ScriptedPlatform {
    pub fn new(times: &[u64]) -> Self {
        Self {
            times: times.to_vec(),
            cursor: Cell::new(0),
            idle_calls: 0,
            delayed_millis: 0,
        }
    }

    /// Clock readings consumed so far.
    pub fn reads(&self) -> usize {
        self.cursor.get()
    }
}

impl Clock for ScriptedPlatform {
    fn millis(&self) -> u64 {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        match self.times.get(i) {
            Some(&t) => t,
            None => *self.times.last().unwrap_or(&0),
        }
    }
}

impl Platform for ScriptedPlatform {
    fn idle(&mut self) {
        self.idle_calls += 1;
    }

    fn delay_millis(&mut self, ms: u64) {
        self.delayed_millis += ms;
    }
}
