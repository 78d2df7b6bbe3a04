//! Camera rig: perspective description, the intro fly-in glide, and the
//! clamped orbit the viewer gets afterwards.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, INTRO_START_DISTANCE, ORBIT_AZIMUTH_LIMIT_DEG,
    ORBIT_POLAR_LIMIT_DEG,
};
use crate::error::{require, CardError};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn for_card(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Eased fly-in from a point close to the tree out to the rest pose.
///
/// The start is latched on the first `eye_at` call so the glide begins when
/// the driver does, not at construction.
pub struct IntroGlide {
    intro_eye: Vec3,
    final_eye: Vec3,
    target: Vec3,
    duration: f32,
    start: Option<f32>,
    done: bool,
}

impl IntroGlide {
    pub fn new(final_eye: Vec3, target: Vec3, duration: f32) -> Result<Self, CardError> {
        require(duration > 0.0, "intro duration must be positive")?;
        let intro_eye = (final_eye - target).normalize() * INTRO_START_DISTANCE + target;
        Ok(Self {
            intro_eye,
            final_eye,
            target,
            duration,
            start: None,
            done: false,
        })
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn final_eye(&self) -> Vec3 {
        self.final_eye
    }

    pub fn intro_eye(&self) -> Vec3 {
        self.intro_eye
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Camera eye at time `t`. Ease-out cubic; lands exactly on the final
    /// eye and stays there.
    pub fn eye_at(&mut self, t: f32) -> Vec3 {
        if self.done {
            return self.final_eye;
        }
        let start = *self.start.get_or_insert(t);
        let p = ((t - start) / self.duration).clamp(0.0, 1.0);
        if p >= 1.0 {
            self.done = true;
            return self.final_eye;
        }
        let ease = 1.0 - (1.0 - p).powi(3);
        self.intro_eye.lerp(self.final_eye, ease)
    }
}

/// Viewer-driven orbit around the look target, clamped near the rest pose
/// so the card never shows its back.
pub struct OrbitRig {
    target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    azimuth_range: (f32, f32),
    polar_range: (f32, f32),
    distance_range: (f32, f32),
}

impl OrbitRig {
    /// Derive the rig and its clamps from the rest pose, given how close
    /// the intro started (the near zoom bound follows it).
    pub fn from_rest_pose(eye: Vec3, target: Vec3, intro_distance: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let azimuth = offset.x.atan2(offset.z);
        let polar = (offset.y / distance.max(1e-6)).clamp(-1.0, 1.0).acos();

        let az_limit = ORBIT_AZIMUTH_LIMIT_DEG.to_radians();
        let pol_limit = ORBIT_POLAR_LIMIT_DEG.to_radians();
        Self {
            target,
            azimuth,
            polar,
            distance,
            azimuth_range: (azimuth - az_limit, azimuth + az_limit),
            polar_range: (
                (polar - pol_limit).max(0.001),
                (polar + pol_limit).min(std::f32::consts::PI - 0.001),
            ),
            distance_range: ((intro_distance * 0.85).max(1.5), distance + 2.5),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth =
            (self.azimuth + d_azimuth).clamp(self.azimuth_range.0, self.azimuth_range.1);
        self.polar = (self.polar + d_polar).clamp(self.polar_range.0, self.polar_range.1);
    }

    pub fn dolly(&mut self, d_distance: f32) {
        self.distance =
            (self.distance + d_distance).clamp(self.distance_range.0, self.distance_range.1);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                self.distance * sin_p * sin_a,
                self.distance * cos_p,
                self.distance * sin_p * cos_a,
            )
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

/// Cubic ease-out shared by the intro and the tests.
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    1.0 - (1.0 - p.clamp(0.0, 1.0)).powi(3)
}
