/*
 *  bin/pixelpod-demo.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Demo renderer: boot animation plus a paced bouncing-shapes scene,
 *  presented to the terminal as unicode half-blocks.
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

use std::io::{self, Write};

use anyhow::Result;
use env_logger::Env;
use log::info;

use pixelpod::boot::run_logo_animation;
use pixelpod::config;
use pixelpod::constants::{DEFAULT_FRAME_RATE, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use pixelpod::{Color, DisplayError, DisplaySwap, HostPlatform, Pacer, PresentSink};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Presents packed frames as two pixel rows per terminal line using
/// unicode half-blocks. Stdout writes complete before returning, so
/// `wait_end_of_present` has nothing left to wait for.
struct TerminalSink {
    width: usize,
    height: usize,
    homed: bool,
}

impl TerminalSink {
    fn new(width: u32, height: u32) -> Self {
        Self { width: width as usize, height: height as usize, homed: false }
    }

    fn pixel(&self, buffer: &[u8], x: usize, y: usize) -> bool {
        buffer[x + (y / 8) * self.width] >> (y & 7) & 1 != 0
    }
}

impl PresentSink for TerminalSink {
    fn paint_screen(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let mut out = String::with_capacity((self.width + 1) * self.height / 2 + 8);
        if !self.homed {
            out.push_str("\x1b[2J");
            self.homed = true;
        }
        out.push_str("\x1b[H");
        for row in 0..self.height / 2 {
            for x in 0..self.width {
                let upper = self.pixel(buffer, x, row * 2);
                let lower = self.pixel(buffer, x, row * 2 + 1);
                out.push(match (upper, lower) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
        }
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(out.as_bytes())?;
        handle.flush()?;
        Ok(())
    }

    fn wait_end_of_present(&mut self) {}
}

/// True once `frame_count` granted frames exhaust the budget.
/// `frame_count` is the 0-based index of the last granted frame.
fn budget_reached(frame_count: i64, budget: Option<u64>) -> bool {
    budget.is_some_and(|n| frame_count + 1 >= n as i64)
}

fn draw_logo(fb: &mut pixelpod::FrameBuffer, y: i32) {
    let w = fb.width() as i32;
    fb.fill_round_rect(w / 2 - 34, y, 68, 16, 4, Color::On);
    fb.fill_circle(w / 2 - 22, y + 8, 4, Color::Off);
    fb.fill_rect(w / 2 - 12, y + 5, 32, 2, Color::Off);
    fb.fill_rect(w / 2 - 12, y + 9, 24, 2, Color::Off);
    fb.draw_circle(w / 2 + 26, y + 8, 5, Color::Off);
}

fn main() -> Result<()> {
    let cfg = config::load()?;
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("pixelpod-demo {} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let width = cfg.display.as_ref().and_then(|d| d.width).unwrap_or(DISPLAY_WIDTH);
    let height = cfg.display.as_ref().and_then(|d| d.height).unwrap_or(DISPLAY_HEIGHT);
    let rate = cfg.frame_rate.unwrap_or(DEFAULT_FRAME_RATE);

    let mut platform = HostPlatform::new();
    let mut display = DisplaySwap::new(TerminalSink::new(width, height), width, height);
    if cfg.double_buffer.unwrap_or(true) {
        display.enable_double_buffer()?;
        info!("double buffering on");
    }
    let mut pacer = Pacer::new(rate);

    run_logo_animation(&mut display, &mut platform, draw_logo)?;

    // bouncing-ball scene state
    let (mut bx, mut by) = (width as i32 / 2, height as i32 / 2);
    let (mut vx, mut vy) = (2i32, 1i32);
    let radius = 5u32;
    let budget = cfg.frames;

    loop {
        if budget_reached(pacer.frame_count(), budget) {
            break;
        }
        if !pacer.next_frame(&mut platform) {
            continue;
        }

        bx += vx;
        by += vy;
        if bx - radius as i32 <= 1 || bx + radius as i32 >= width as i32 - 2 {
            vx = -vx;
        }
        if by - radius as i32 <= 1 || by + radius as i32 >= height as i32 - 2 {
            vy = -vy;
        }

        let fb = display.active_mut();
        fb.clear();
        fb.draw_round_rect(0, 0, width, height, 3, Color::On);
        fb.fill_circle(bx, by, radius, Color::On);
        fb.draw_triangle(
            4,
            height as i32 - 5,
            14,
            height as i32 - 5,
            9,
            height as i32 - 13,
            Color::On,
        );
        display.present()?;

        if pacer.every_x_frames(60) {
            info!(
                "frame {} cpu load {}% ({}ms of {}ms)",
                pacer.frame_count(),
                pacer.cpu_load(),
                pacer.last_frame_duration_ms(),
                pacer.each_frame_millis()
            );
        }
    }

    info!("done after {} frames", pacer.frame_count() + 1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::budget_reached;

    #[test]
    fn frame_budget_counts_granted_frames() {
        // --frames 1 must stop after exactly one granted frame
        assert!(!budget_reached(-1, Some(1)));
        assert!(budget_reached(0, Some(1)));
        assert!(!budget_reached(0, Some(2)));
        assert!(budget_reached(1, Some(2)));
        assert!(!budget_reached(1000, None));
    }
}
