//! Global constants shared by the framebuffer, codecs and frame pacer.

/// The total width of the display in pixels.
pub const DISPLAY_WIDTH: u32 = 128;
/// The total height of the display in pixels. Must stay a multiple of 8;
/// the packed buffer stores 8 rows per byte.
pub const DISPLAY_HEIGHT: u32 = 64;

/// Bytes in one packed framebuffer at the default geometry.
pub const DISPLAY_BUFFER_LEN: usize = (DISPLAY_WIDTH * DISPLAY_HEIGHT / 8) as usize;

/// Logical frame rate the pacer is configured with at startup.
pub const DEFAULT_FRAME_RATE: u8 = 60;

/// Minimum milliseconds left before the frame deadline for the pacer to
/// yield idle time. Below this the host wake granularity (~1ms) could
/// oversleep past the deadline, so the pacer busy-waits instead.
pub const IDLE_SLACK_MILLIS: u64 = 2;

// Startup animation cadence.
/// First logo scroll position (above the top edge).
pub const LOGO_SCROLL_START_Y: i32 = -18;
/// Final logo scroll position.
pub const LOGO_SCROLL_END_Y: i32 = 24;
/// Per-step delay of the logo scroll, in milliseconds.
pub const LOGO_STEP_MILLIS: u64 = 27;
/// Scroll position where the animation holds briefly.
pub const LOGO_HOLD_Y: i32 = -16;
/// Duration of the mid-scroll hold, in milliseconds.
pub const LOGO_HOLD_MILLIS: u64 = 250;
/// Hold on the finished logo before returning, in milliseconds.
pub const LOGO_TAIL_MILLIS: u64 = 700;
