// Host-side tests for the handwriting reveal: dormancy, the latched start
// time, mask geometry and the destination-in composite.

use card_core::{CardError, HandwritingReveal, RevealParams};

fn params(duration: f32, delay: f32) -> RevealParams {
    RevealParams::new(duration, delay)
}

fn opaque_source(p: &RevealParams) -> Vec<u8> {
    vec![255; (p.width * p.height) as usize * 4]
}

fn ready_reveal(duration: f32, delay: f32, created_at: f32) -> HandwritingReveal {
    let p = params(duration, delay);
    let mut reveal = HandwritingReveal::new(p, created_at, 0.0).unwrap();
    reveal.set_source(opaque_source(&p)).unwrap();
    reveal
}

#[test]
fn dormant_without_a_source_bitmap() {
    let mut reveal = HandwritingReveal::new(params(3.0, 0.0), 0.0, 0.0).unwrap();
    assert!(!reveal.is_ready());
    assert!(reveal.step(100.0).is_none());
    assert_eq!(reveal.progress(), 0.0);
}

#[test]
fn delay_window_then_latched_start() {
    let mut reveal = ready_reveal(3.0, 1.3, 0.0);

    // inside the delay window: no latch, still hidden
    assert!(reveal.step(0.5).is_none());
    assert_eq!(reveal.progress(), 0.0);

    // first eligible call latches start = t + delay = 2.6, so the reveal
    // itself is still pending
    assert!(reveal.step(1.3).is_none());

    let frame = reveal.step(4.6).expect("running");
    assert!(
        (frame.progress - 2.0 / 3.0).abs() < 1e-3,
        "expected 2/3 progress, got {}",
        frame.progress
    );

    let frame = reveal.step(10.0).expect("finished");
    assert_eq!(frame.progress, 1.0);
}

#[test]
fn late_first_update_shifts_the_whole_animation() {
    let mut reveal = ready_reveal(2.0, 1.0, 0.0);
    // the driver only starts calling at t = 5, well past created_at + delay
    assert!(reveal.step(5.0).is_none()); // latches start = 6.0
    assert!(reveal.step(5.9).is_none());
    let frame = reveal.step(7.0).expect("running");
    assert!((frame.progress - 0.5).abs() < 1e-3);
}

#[test]
fn progress_is_monotonic_and_clamps_at_one() {
    let mut reveal = ready_reveal(3.0, 0.0, 0.0);
    let mut prev = 0.0_f32;
    let mut t = 0.0_f32;
    while t < 8.0 {
        if let Some(frame) = reveal.step(t) {
            assert!(frame.progress >= prev, "progress went backwards at t={t}");
            assert!(frame.progress.is_finite());
            prev = frame.progress;
        }
        t += 0.21;
    }
    assert_eq!(reveal.step(100.0).unwrap().progress, 1.0);
}

#[test]
fn mask_is_opaque_left_of_the_cutoff() {
    let mut reveal = ready_reveal(2.0, 0.0, 0.0);
    reveal.step(0.0); // latch
    let frame = reveal.step(1.0).expect("running");
    let p = *reveal.params();
    let cutoff = frame.cutoff_x as usize;

    let mask = reveal.mask();
    for row in 0..p.height as usize {
        for col in 0..cutoff.saturating_sub(1) {
            assert_eq!(
                mask[row * p.width as usize + col],
                255,
                "hole left of cutoff at ({col},{row})"
            );
        }
    }
}

#[test]
fn mask_fades_radially_at_the_writing_front() {
    let mut reveal = ready_reveal(2.0, 0.0, 0.0);
    reveal.step(0.0);
    let frame = reveal.step(1.0).expect("running");
    let p = *reveal.params();
    let w = p.width as usize;
    let mask = reveal.mask();

    // just ahead of the pen on the baseline: inside the feather
    let near = (frame.cutoff_x + p.feather * 0.25) as usize;
    let baseline_row = p.baseline as usize;
    assert!(mask[baseline_row * w + near] > 0, "feather missing near the pen");

    // far beyond the feather radius: fully hidden
    let far = (frame.cutoff_x + p.feather * 2.0) as usize;
    if far < w {
        assert_eq!(mask[baseline_row * w + far], 0, "mask leaks past the feather");
    }

    // same column but far above the baseline: radial distance hides it
    let top_row = 0usize;
    let dy = p.baseline as f32;
    if dy > p.feather {
        assert_eq!(mask[top_row * w + near], 0, "feather is not radial");
    }
}

#[test]
fn output_alpha_never_exceeds_source_alpha() {
    let p = params(2.0, 0.0);
    let mut src = opaque_source(&p);
    // graded alpha in the source
    for (i, px) in src.chunks_exact_mut(4).enumerate() {
        px[3] = (i % 251) as u8;
    }
    let mut reveal = HandwritingReveal::new(p, 0.0, 0.0).unwrap();
    reveal.set_source(src.clone()).unwrap();
    reveal.step(0.0);
    reveal.step(1.0).expect("running");

    for (out_px, src_px) in reveal.output().chunks_exact(4).zip(src.chunks_exact(4)) {
        assert!(out_px[3] <= src_px[3], "composite brightened the alpha");
        assert_eq!(out_px[0], src_px[0], "composite touched rgb");
    }
}

#[test]
fn fully_revealed_output_matches_the_source_run() {
    let p = params(1.0, 0.0);
    let mut reveal = HandwritingReveal::new(p, 0.0, 0.0).unwrap();
    reveal.set_source(opaque_source(&p)).unwrap();
    reveal.step(0.0);
    let frame = reveal.step(50.0).expect("finished");
    assert_eq!(frame.progress, 1.0);

    // left of the final cutoff everything is fully visible
    let w = p.width as usize;
    let cutoff = frame.cutoff_x as usize;
    for row in 0..p.height as usize {
        for col in 0..cutoff.saturating_sub(1) {
            assert_eq!(reveal.output()[(row * w + col) * 4 + 3], 255);
        }
    }
    // the cutoff itself has reached the right padding edge
    assert!((frame.cutoff_x - (p.width - p.padding) as f32).abs() < 1e-3);
}

#[test]
fn pen_rides_the_cutoff_on_the_baseline() {
    let mut reveal = ready_reveal(2.0, 0.0, 0.5);
    reveal.step(0.0);
    let p = *reveal.params();
    for t in [0.4, 0.9, 1.6] {
        if let Some(frame) = reveal.step(t) {
            assert_eq!(frame.pen_x, frame.cutoff_x);
            assert_eq!(frame.pen_y, p.baseline as f32);
            assert!(frame.pen_x >= p.padding as f32);
            assert!(frame.pen_x <= (p.width - p.padding) as f32);
        }
    }
    // hand tremor stays within its amplitude
    for t in 0..100 {
        let j = reveal.pen_jitter(t as f32 * 0.13);
        assert!(j.abs() <= card_core::PEN_JITTER_AMOUNT + f32::EPSILON);
    }
}

#[test]
fn writing_starts_at_the_padding_column() {
    // the glyph run is drawn left-aligned at the padding column, so the pen
    // must begin exactly there, on the first stroke of the first letter
    let mut reveal = ready_reveal(2.0, 0.0, 0.0);
    let frame = reveal.step(0.0).expect("sweep begins at the latch");
    let p = *reveal.params();
    assert_eq!(frame.progress, 0.0);
    assert_eq!(frame.cutoff_x, p.padding as f32);
    assert_eq!(frame.pen_x, p.padding as f32);
}

#[test]
fn source_bitmap_size_is_validated() {
    let mut reveal = HandwritingReveal::new(params(1.0, 0.0), 0.0, 0.0).unwrap();
    assert!(matches!(
        reveal.set_source(vec![0; 16]),
        Err(CardError::InvalidArgument(_))
    ));
    assert!(!reveal.is_ready());
}

#[test]
fn invalid_reveal_parameters_are_rejected() {
    let mut p = params(0.0, 0.0);
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "zero duration");

    p = params(1.0, -0.5);
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "negative delay");

    p = params(1.0, f32::NAN);
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "NaN delay");

    p = params(1.0, 0.0);
    p.feather = 0.0;
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "zero feather");

    p = params(1.0, 0.0);
    p.padding = p.width;
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "padding too wide");

    p = params(1.0, 0.0);
    p.baseline = p.height;
    assert!(HandwritingReveal::new(p, 0.0, 0.0).is_err(), "baseline outside");
}
