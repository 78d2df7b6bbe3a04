// Host-side tests for the cone-distributed ornament field: placement,
// sway containment, determinism and parameter validation.

use card_core::{CardError, ConeParams, OrnamentField, SwayParams, ORNAMENT_PALETTE};

const EPS: f32 = 1e-3;

fn default_field(seed: u64) -> OrnamentField {
    OrnamentField::new(ConeParams::default(), &ORNAMENT_PALETTE, seed).unwrap()
}

#[test]
fn base_positions_fill_the_cone_envelope() {
    let field = default_field(42);
    let params = ConeParams::default();
    for orn in field.ornaments() {
        let y = orn.base_position.y;
        assert!(
            y >= params.vertical_offset - EPS
                && y <= params.vertical_offset + params.height + EPS,
            "ornament height {y} outside the cone"
        );
        let r = orn.base_position.x.hypot(orn.base_position.z);
        assert!(
            r <= field.allowed_radius(y) + EPS,
            "ornament radius {r} exceeds envelope {}",
            field.allowed_radius(y)
        );
    }
}

#[test]
fn sway_never_escapes_the_envelope() {
    let mut field = default_field(7);
    let mut t = 0.0_f32;
    while t < 60.0 {
        let instances = field.step(t).to_vec();
        for inst in &instances {
            let allowed = field.allowed_radius(inst.position.y);
            let r = inst.position.x.hypot(inst.position.z);
            assert!(
                r <= allowed + EPS,
                "t={t}: radius {r} exceeds allowed {allowed}"
            );
        }
        t += 0.37;
    }
}

#[test]
fn containment_holds_with_exaggerated_sway() {
    let mut field = default_field(3);
    field.set_sway(SwayParams {
        amplitude: 2.5,
        ..SwayParams::default()
    });
    for step in 0..200 {
        let t = step as f32 * 0.11;
        let instances = field.step(t).to_vec();
        for inst in &instances {
            let allowed = field.allowed_radius(inst.position.y);
            let r = inst.position.x.hypot(inst.position.z);
            assert!(r <= allowed + EPS, "t={t}: radius {r} > allowed {allowed}");
        }
    }
}

#[test]
fn same_seed_gives_identical_fields() {
    let a = default_field(99);
    let b = default_field(99);
    for (oa, ob) in a.ornaments().iter().zip(b.ornaments()) {
        assert_eq!(oa.base_position, ob.base_position);
        assert_eq!(oa.phase, ob.phase);
        assert_eq!(oa.size, ob.size);
        assert_eq!(oa.color, ob.color);
    }
}

#[test]
fn step_is_pure_in_time() {
    let mut field = default_field(42);
    let first: Vec<_> = field.step(2.5).to_vec();
    // wander around, then come back
    field.step(10.0);
    field.step(0.1);
    let again = field.step(2.5);
    for (a, b) in first.iter().zip(again) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
    }
}

#[test]
fn instance_order_is_stable_across_frames() {
    let mut field = default_field(5);
    let colors: Vec<_> = field.step(0.0).iter().map(|i| i.color).collect();
    let scales: Vec<_> = field.step(0.0).iter().map(|i| i.scale).collect();
    for t in [1.0, 3.3, 7.7] {
        for (i, inst) in field.step(t).iter().enumerate() {
            assert_eq!(inst.color, colors[i], "color moved at index {i}");
            assert_eq!(inst.scale, scales[i], "scale moved at index {i}");
        }
    }
}

#[test]
fn empty_field_is_allowed() {
    let params = ConeParams {
        count: 0,
        ..ConeParams::default()
    };
    let mut field = OrnamentField::new(params, &ORNAMENT_PALETTE, 1).unwrap();
    assert!(field.is_empty());
    assert!(field.step(1.0).is_empty());
}

#[test]
fn invalid_cone_parameters_are_rejected() {
    let bad_height = ConeParams {
        height: 0.0,
        ..ConeParams::default()
    };
    assert!(matches!(
        OrnamentField::new(bad_height, &ORNAMENT_PALETTE, 1),
        Err(CardError::InvalidArgument(_))
    ));

    let bad_radius = ConeParams {
        base_radius: -1.0,
        ..ConeParams::default()
    };
    assert!(OrnamentField::new(bad_radius, &ORNAMENT_PALETTE, 1).is_err());

    let reversed_sizes = ConeParams {
        size_range: (0.2, 0.1),
        ..ConeParams::default()
    };
    assert!(OrnamentField::new(reversed_sizes, &ORNAMENT_PALETTE, 1).is_err());

    assert!(OrnamentField::new(ConeParams::default(), &[], 1).is_err());
}

#[test]
fn single_ornament_respects_scene_bounds() {
    let params = ConeParams {
        count: 1,
        height: 9.0,
        base_radius: 4.3,
        vertical_offset: 1.4,
        size_range: (0.05, 0.05),
    };
    let field = OrnamentField::new(params, &ORNAMENT_PALETTE, 42).unwrap();
    let orn = &field.ornaments()[0];
    assert!(orn.base_position.y >= 1.4 && orn.base_position.y <= 10.4);
    assert!(orn.base_position.x.hypot(orn.base_position.z) <= 4.3);
    assert_eq!(orn.size, 0.05);
}

#[test]
fn sizes_stay_inside_the_requested_range() {
    let field = default_field(12);
    let (lo, hi) = ConeParams::default().size_range;
    for orn in field.ornaments() {
        assert!(orn.size >= lo && orn.size <= hi, "size {} outside range", orn.size);
    }
}
