// Host-side tests for the camera rig: intro glide easing and landing, and
// the clamped orbit.

use card_core::{
    ease_out_cubic, final_camera_vec3, look_target_vec3, Camera, IntroGlide, OrbitRig,
    INTRO_DURATION, INTRO_START_DISTANCE, ORBIT_AZIMUTH_LIMIT_DEG, ORBIT_POLAR_LIMIT_DEG,
};
use glam::Vec3;

fn glide() -> IntroGlide {
    IntroGlide::new(final_camera_vec3(), look_target_vec3(), INTRO_DURATION).unwrap()
}

#[test]
fn intro_starts_close_along_the_final_axis() {
    let g = glide();
    let offset = g.intro_eye() - g.target();
    assert!((offset.length() - INTRO_START_DISTANCE).abs() < 1e-4);
    // same direction as the rest pose
    let final_dir = (g.final_eye() - g.target()).normalize();
    assert!(offset.normalize().dot(final_dir) > 0.9999);
}

#[test]
fn glide_latches_on_first_call_and_eases_out() {
    let mut g = glide();
    // driver starts late; the glide starts with it
    let first = g.eye_at(2.0);
    assert!((first - g.intro_eye()).length() < 1e-4);

    let mid = g.eye_at(2.0 + INTRO_DURATION * 0.5);
    let expected = g
        .intro_eye()
        .lerp(g.final_eye(), ease_out_cubic(0.5));
    assert!((mid - expected).length() < 1e-4);
}

#[test]
fn glide_lands_exactly_on_the_final_eye() {
    let mut g = glide();
    g.eye_at(0.0);
    let landed = g.eye_at(INTRO_DURATION + 0.001);
    assert_eq!(landed, g.final_eye());
    assert!(g.is_done());
    // and stays there
    assert_eq!(g.eye_at(1000.0), g.final_eye());
}

#[test]
fn glide_never_overshoots_the_segment() {
    let mut g = glide();
    g.eye_at(0.0);
    let lo = g.intro_eye().min(g.final_eye()) - Vec3::splat(1e-4);
    let hi = g.intro_eye().max(g.final_eye()) + Vec3::splat(1e-4);
    for step in 0..200 {
        let eye = g.eye_at(step as f32 * 0.02);
        assert!(eye.cmpge(lo).all() && eye.cmple(hi).all(), "overshoot at {eye:?}");
    }
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_out_cubic(i as f32 / 100.0);
        assert!(v >= prev, "easing not monotonic");
        prev = v;
    }
    // clamps outside [0, 1]
    assert_eq!(ease_out_cubic(-2.0), 0.0);
    assert_eq!(ease_out_cubic(3.0), 1.0);
}

#[test]
fn orbit_reproduces_the_rest_pose() {
    let eye = final_camera_vec3();
    let target = look_target_vec3();
    let rig = OrbitRig::from_rest_pose(eye, target, INTRO_START_DISTANCE);
    assert!((rig.eye() - eye).length() < 1e-4, "rest pose drifted: {:?}", rig.eye());
}

#[test]
fn orbit_azimuth_is_clamped() {
    let eye = final_camera_vec3();
    let target = look_target_vec3();
    let mut rig = OrbitRig::from_rest_pose(eye, target, INTRO_START_DISTANCE);

    let rest_offset = eye - target;
    let rest_azimuth = rest_offset.x.atan2(rest_offset.z);
    let limit = ORBIT_AZIMUTH_LIMIT_DEG.to_radians();

    // drag far past the limit in both directions
    for _ in 0..100 {
        rig.rotate(0.5, 0.0);
    }
    let offset = rig.eye() - target;
    let azimuth = offset.x.atan2(offset.z);
    assert!((azimuth - rest_azimuth).abs() <= limit + 1e-4);

    for _ in 0..200 {
        rig.rotate(-0.5, 0.0);
    }
    let offset = rig.eye() - target;
    let azimuth = offset.x.atan2(offset.z);
    assert!((azimuth - rest_azimuth).abs() <= limit + 1e-4);
}

#[test]
fn orbit_polar_is_clamped() {
    let eye = final_camera_vec3();
    let target = look_target_vec3();
    let mut rig = OrbitRig::from_rest_pose(eye, target, INTRO_START_DISTANCE);
    let limit = ORBIT_POLAR_LIMIT_DEG.to_radians();

    let rest_offset = eye - target;
    let distance = rest_offset.length();
    let rest_polar = (rest_offset.y / distance).acos();

    for _ in 0..100 {
        rig.rotate(0.0, 0.5);
    }
    let offset = rig.eye() - target;
    let polar = (offset.y / offset.length()).acos();
    assert!((polar - rest_polar).abs() <= limit + 1e-4);
}

#[test]
fn orbit_dolly_is_clamped() {
    let eye = final_camera_vec3();
    let target = look_target_vec3();
    let mut rig = OrbitRig::from_rest_pose(eye, target, INTRO_START_DISTANCE);
    let rest_distance = (eye - target).length();

    for _ in 0..1000 {
        rig.dolly(1.0);
    }
    assert!((rig.distance() - (rest_distance + 2.5)).abs() < 1e-4);

    for _ in 0..1000 {
        rig.dolly(-1.0);
    }
    let near = (INTRO_START_DISTANCE * 0.85).max(1.5);
    assert!((rig.distance() - near).abs() < 1e-4);
}

#[test]
fn camera_matrices_are_finite() {
    let camera = Camera::for_card(final_camera_vec3(), look_target_vec3(), 16.0 / 9.0);
    let vp = camera.view_proj();
    assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    // the look target projects to the screen center column
    let clip = vp * look_target_vec3().extend(1.0);
    assert!((clip.x / clip.w).abs() < 1e-4);
}
