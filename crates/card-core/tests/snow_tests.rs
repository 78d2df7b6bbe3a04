// Host-side tests for the falling snow field.

use card_core::{SnowField, SNOW_CEILING, SNOW_EXTENT, SNOW_FALL_SPEED, SNOW_RESET_HEIGHT};

#[test]
fn flakes_start_inside_the_box() {
    let field = SnowField::new(500, 42).unwrap();
    for f in field.flakes() {
        assert!(f.x.abs() <= SNOW_EXTENT / 2.0);
        assert!(f.z.abs() <= SNOW_EXTENT / 2.0);
        assert!(f.y >= 0.0 && f.y <= SNOW_CEILING);
    }
}

#[test]
fn flakes_fall_at_the_configured_rate() {
    let mut field = SnowField::new(50, 1).unwrap();
    let before: Vec<_> = field.flakes().to_vec();
    field.step(0.5);
    for (a, b) in before.iter().zip(field.flakes()) {
        if b.y < a.y {
            assert!((a.y - b.y - SNOW_FALL_SPEED * 0.5).abs() < 1e-5);
        } else {
            // crossed the ground and respawned
            assert_eq!(b.y, SNOW_RESET_HEIGHT);
        }
        // horizontal drift position is kept
        assert_eq!(a.x, b.x);
        assert_eq!(a.z, b.z);
    }
}

#[test]
fn flakes_wrap_and_stay_bounded_forever() {
    let mut field = SnowField::new(200, 7).unwrap();
    let ceiling = SNOW_CEILING.max(SNOW_RESET_HEIGHT);
    // long run: every flake must cross the ground at least once
    for _ in 0..2000 {
        field.step(1.0 / 60.0);
        for f in field.flakes() {
            assert!(f.y >= 0.0 && f.y <= ceiling, "flake escaped at y={}", f.y);
        }
    }
}

#[test]
fn negative_dt_does_not_move_flakes() {
    let mut field = SnowField::new(20, 3).unwrap();
    let before: Vec<_> = field.flakes().to_vec();
    field.step(-1.0);
    assert_eq!(before, field.flakes());
}

#[test]
fn same_seed_is_deterministic() {
    let mut a = SnowField::new(100, 9).unwrap();
    let mut b = SnowField::new(100, 9).unwrap();
    for _ in 0..100 {
        a.step(0.016);
        b.step(0.016);
    }
    assert_eq!(a.flakes(), b.flakes());
}

#[test]
fn empty_field_is_rejected() {
    assert!(SnowField::new(0, 1).is_err());
}
