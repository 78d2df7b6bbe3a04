//! Fixed decoration around the tree: the star on top, the snowy ground
//! displacement, the background sparkles, and the counter-light boost that
//! keeps the scene readable when the viewer orbits away from the key light.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{
    SPARKLE_RADIUS, STAR_POSITION, STAR_PULSE_AMOUNT, STAR_PULSE_FREQ, STAR_SPIN_RATE,
};

/// Spin angle and pulse scale for the star at time `t`.
#[derive(Clone, Copy, Debug)]
pub struct StarTransform {
    pub position: Vec3,
    pub rotation: f32,
    pub scale: f32,
}

pub fn star_transform(t: f32) -> StarTransform {
    StarTransform {
        position: Vec3::from(STAR_POSITION),
        rotation: t * STAR_SPIN_RATE,
        scale: 1.0 + (t * STAR_PULSE_FREQ).sin() * STAR_PULSE_AMOUNT,
    }
}

/// Gentle dune displacement for the snow ground, fading to flat at the rim.
pub fn ground_height(x: f32, z: f32, rim_radius: f32) -> f32 {
    let s1 = (x * 0.35).sin() * (z * 0.5).cos();
    let s2 = 0.5 * (x * 0.8 + z * 0.6).sin();
    let s3 = 0.25 * (x * 1.6 - z * 1.2).cos();
    let falloff = (1.0 - x.hypot(z) / rim_radius).max(0.0);
    (s1 + s2 + s3) * 0.25 * falloff
}

/// Static background star points scattered in a cylinder around the scene.
pub fn sparkle_positions(count: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r = SPARKLE_RADIUS * rng.gen::<f32>();
            let a = rng.gen::<f32>() * std::f32::consts::TAU;
            Vec3::new(a.cos() * r, 2.0 + rng.gen::<f32>() * 18.0, a.sin() * r)
        })
        .collect()
}

/// Base intensities of the card's light set.
#[derive(Clone, Copy, Debug)]
pub struct LightRig {
    pub key: f32,
    pub rim: f32,
    pub back: f32,
    pub fill: f32,
    pub camera_fill: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            key: 1.1,
            rim: 0.9,
            back: 0.9,
            fill: 0.35,
            camera_fill: 0.0,
        }
    }
}

impl LightRig {
    /// Boost the secondary lights as the view direction swings opposite the
    /// key light, so the shadow side of the tree never goes black.
    pub fn boosted(&self, view_dir: Vec3, key_dir: Vec3) -> LightRig {
        let alignment = view_dir.normalize().dot(key_dir.normalize()).clamp(-1.0, 1.0);
        let opposite = (1.0 - alignment) * 0.5;
        let boost = opposite * opposite;
        LightRig {
            key: self.key,
            rim: self.rim + boost * 0.2,
            back: self.back + boost * 0.45,
            fill: self.fill + boost * 0.55,
            camera_fill: boost * 0.9,
        }
    }
}
