/*
 *  tests/core_integration.rs
 *
 *  Integration tests driving the core through its public API: pacing,
 *  drawing, codecs and the swap protocol working together.
 *
 *  PixelPod - small screen, steady frames
 */

use pixelpod::boot::run_logo_animation;
use pixelpod::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use pixelpod::{CaptureSink, Color, DisplaySwap, Pacer, ScriptedPlatform};

#[test]
fn paced_render_loop_presents_one_frame_per_grant() {
    // grant at 0, measure at 2, wait at 9, grant at 16, measure, grant at 33
    let mut platform = ScriptedPlatform::new(&[0, 2, 9, 16, 16, 33]);
    let mut display = DisplaySwap::new(CaptureSink::new(), DISPLAY_WIDTH, DISPLAY_HEIGHT);
    let mut pacer = Pacer::new(60);

    for _ in 0..6 {
        if !pacer.next_frame(&mut platform) {
            continue;
        }
        let frame = pacer.frame_count() as i32;
        let fb = display.active_mut();
        fb.clear();
        fb.fill_rect(frame * 10, 0, 8, 8, Color::On);
        display.present().unwrap();
    }

    assert_eq!(pacer.frame_count(), 2);
    assert_eq!(display.sink().frames_painted, 3);
    assert_eq!(platform.idle_calls, 1); // only the t=9 wait had slack
    // last painted frame carries frame 2's rectangle
    assert_eq!(display.active().get_pixel(20, 0), 1);
}

#[test]
fn double_buffered_loop_never_disturbs_the_presented_frame() {
    let mut display = DisplaySwap::new(CaptureSink::new(), 64, 32);
    display.enable_double_buffer().unwrap();

    display.active_mut().fill_circle(20, 16, 8, Color::On);
    display.present().unwrap();
    let presented = display.sink().last_frame.clone();

    // next frame's drawing happens in the other slot
    let fb = display.active_mut();
    fb.fill(Color::On);
    fb.fill_triangle(2, 2, 60, 2, 30, 30, Color::Toggle);
    assert_eq!(display.in_flight().unwrap().as_slice(), presented.as_slice());

    display.present().unwrap();
    assert_ne!(display.sink().last_frame, presented);
}

#[test]
fn decoded_asset_flows_through_swap_to_the_sink() {
    // 8x8 all-set image: header (7, 7, color=1) then one 64-pixel run.
    // 64-1=63 needs a 7-bit length field: 3 zero bits, a 1, then 63.
    let mut bits: Vec<u16> = Vec::new();
    let push_val = |bits: &mut Vec<u16>, v: u32, n: u32| {
        for i in 0..n {
            bits.push(((v >> i) & 1) as u16);
        }
    };
    push_val(&mut bits, 7, 8);
    push_val(&mut bits, 7, 8);
    push_val(&mut bits, 1, 1);
    push_val(&mut bits, 0b1000, 4); // unary selector: three 0s then 1
    push_val(&mut bits, 63, 7);
    let mut stream = vec![0u8; (bits.len() + 7) / 8];
    for (i, b) in bits.iter().enumerate() {
        stream[i / 8] |= (b << (i % 8)) as u8;
    }

    let mut display = DisplaySwap::new(CaptureSink::new(), 32, 16);
    display.active_mut().draw_compressed(3, 4, &stream, Color::On).unwrap();
    display.present().unwrap();

    let painted = display.sink().last_frame.clone();
    let mut expect = DisplaySwap::new(CaptureSink::new(), 32, 16);
    expect.active_mut().fill_rect(3, 4, 8, 8, Color::On);
    assert_eq!(painted, expect.active().as_slice());
}

#[test]
fn boot_animation_runs_through_the_public_surface() {
    let mut display = DisplaySwap::new(CaptureSink::new(), DISPLAY_WIDTH, DISPLAY_HEIGHT);
    display.enable_double_buffer().unwrap();
    let mut platform = ScriptedPlatform::new(&[0]);

    run_logo_animation(&mut display, &mut platform, |fb, y| {
        fb.draw_bitmap(20, y, &[0xFF; 16], 16, 8, Color::On);
    })
    .unwrap();

    assert_eq!(display.sink().frames_painted, 43); // y = -18..=24
    assert!(platform.delayed_millis >= 43 * 27 + 250 + 700);
    // the resting frame shows the bitmap at y = 24
    assert_eq!(display.in_flight().unwrap().get_pixel(20, 24), 1);
    assert_eq!(display.in_flight().unwrap().get_pixel(20, 23), 0);
}
