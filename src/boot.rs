/*
 *  boot.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Shared startup-animation driver. What gets drawn each step is a
 *  strategy closure supplied by the caller; the scroll cadence lives here.
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

use crate::constants::{
    LOGO_HOLD_MILLIS, LOGO_HOLD_Y, LOGO_SCROLL_END_Y, LOGO_SCROLL_START_Y, LOGO_STEP_MILLIS,
    LOGO_TAIL_MILLIS,
};
use crate::error::DisplayError;
use crate::framebuffer::FrameBuffer;
use crate::platform::Platform;
use crate::swap::{DisplaySwap, PresentSink};

/// Scrolls a logo down the screen: for each step the active buffer is
/// cleared, `draw_logo` renders one frame at the given vertical offset,
/// and the result is presented. Holds briefly mid-scroll and on the
/// finished logo.
pub fn run_logo_animation<S, P, F>(
    display: &mut DisplaySwap<S>,
    platform: &mut P,
    mut draw_logo: F,
) -> Result<(), DisplayError>
where
    S: PresentSink,
    P: Platform,
    F: FnMut(&mut FrameBuffer, i32),
{
    for y in LOGO_SCROLL_START_Y..=LOGO_SCROLL_END_Y {
        display.active_mut().clear();
        draw_logo(display.active_mut(), y);
        display.present()?;
        platform.delay_millis(LOGO_STEP_MILLIS);
        if y == LOGO_HOLD_Y {
            platform.delay_millis(LOGO_HOLD_MILLIS);
        }
    }
    platform.delay_millis(LOGO_TAIL_MILLIS);
    Ok(())
}
