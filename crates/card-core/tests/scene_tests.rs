// Host-side tests for the scene constants and the fixed decoration
// helpers: star pulse, ground displacement, sparkles and the light boost.

use card_core::{
    ground_height, sparkle_positions, star_transform, LightRig, BLOOM_STRENGTH, BLOOM_THRESHOLD,
    INTRO_DURATION, INTRO_START_DISTANCE, LABELS, LABEL_CANVAS_WIDTH, LABEL_PADDING,
    ORNAMENT_PALETTE, SPARKLE_RADIUS, STAR_PULSE_AMOUNT, STAR_POSITION, TREE_BASE_RADIUS,
    TREE_HEIGHT,
};
use glam::Vec3;

#[test]
fn scene_constants_are_coherent() {
    assert!(TREE_HEIGHT > 0.0);
    assert!(TREE_BASE_RADIUS > 0.0);
    assert!(BLOOM_THRESHOLD >= 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(INTRO_DURATION > 0.0);
    assert!(INTRO_START_DISTANCE > 0.0);
    assert!(LABEL_PADDING * 2 < LABEL_CANVAS_WIDTH);
    assert!(!ORNAMENT_PALETTE.is_empty());
    for c in ORNAMENT_PALETTE {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
    // the star sits just above the tree tip
    assert!(STAR_POSITION[1] > TREE_HEIGHT);
}

#[test]
fn greetings_write_in_order() {
    let mut prev_delay = -1.0;
    for def in LABELS {
        assert!(!def.text.is_empty());
        assert!(def.duration > 0.0);
        assert!(def.delay > prev_delay, "labels should start one after another");
        assert!(def.width > 0.0 && def.height > 0.0);
        prev_delay = def.delay;
    }
}

#[test]
fn star_pulse_stays_within_its_amplitude() {
    for step in 0..500 {
        let t = step as f32 * 0.05;
        let star = star_transform(t);
        assert!(star.scale >= 1.0 - STAR_PULSE_AMOUNT - 1e-6);
        assert!(star.scale <= 1.0 + STAR_PULSE_AMOUNT + 1e-6);
        assert_eq!(star.position, Vec3::from(STAR_POSITION));
    }
    // spin advances with time
    assert!(star_transform(2.0).rotation > star_transform(1.0).rotation);
}

#[test]
fn ground_flattens_at_the_rim() {
    let rim = 12.0;
    assert_eq!(ground_height(rim, 0.0, rim), 0.0);
    assert_eq!(ground_height(20.0, 20.0, rim), 0.0);
    // bounded everywhere by the summed sinusoid amplitude
    for i in 0..200 {
        let x = (i as f32 * 0.37).sin() * rim;
        let z = (i as f32 * 0.53).cos() * rim;
        assert!(ground_height(x, z, rim).abs() <= 1.75 * 0.25 + 1e-6);
    }
}

#[test]
fn sparkles_fill_a_cylinder_around_the_scene() {
    let sparkles = sparkle_positions(900, 11);
    assert_eq!(sparkles.len(), 900);
    for p in &sparkles {
        assert!(p.x.hypot(p.z) <= SPARKLE_RADIUS + 1e-4);
        assert!(p.y >= 2.0 && p.y <= 20.0);
    }
    assert_eq!(sparkles, sparkle_positions(900, 11), "not deterministic");
}

#[test]
fn light_boost_peaks_opposite_the_key_light() {
    let rig = LightRig::default();
    let key = Vec3::new(1.0, 1.0, 1.0).normalize();

    let aligned = rig.boosted(key, key);
    assert!((aligned.fill - rig.fill).abs() < 1e-6, "no boost when aligned");
    assert_eq!(aligned.camera_fill, 0.0);

    let opposite = rig.boosted(-key, key);
    assert!(opposite.fill > rig.fill);
    assert!(opposite.back > rig.back);
    assert!(opposite.rim > rig.rim);
    assert!(opposite.camera_fill > 0.0);
    // the key light itself never changes
    assert_eq!(opposite.key, rig.key);

    // the boost grows monotonically as the view swings away
    let side = rig.boosted(Vec3::new(-1.0, 1.0, -1.0).normalize(), key);
    assert!(side.fill > aligned.fill && side.fill < opposite.fill);
}
