//! Cone-distributed ornament field with per-frame sway and re-containment.
//!
//! Every bauble is placed once inside the tree's cone envelope and then
//! displaced each frame by a phase-offset sway. The displaced position is
//! clamped back inside the envelope so the tree silhouette stays stable no
//! matter how the sway parameters are tuned.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{ORNAMENT_BASE_SIZE, ORNAMENT_SPIN_RATE, SWAY};
use crate::error::{require, CardError};

/// Immutable per-bauble seed data, fixed for the field's lifetime.
#[derive(Clone, Copy, Debug)]
pub struct Ornament {
    pub base_position: Vec3,
    pub phase: f32,
    pub size: f32,
    pub color: [f32; 3],
}

/// One frame's placement for a single ornament. Index `i` of the output
/// slice always refers to the same ornament.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrnamentInstance {
    pub position: Vec3,
    pub rotation: f32,
    pub scale: f32,
    pub color: [f32; 3],
}

/// Cone envelope and sampling parameters for [`OrnamentField::new`].
#[derive(Clone, Copy, Debug)]
pub struct ConeParams {
    pub count: usize,
    pub height: f32,
    pub base_radius: f32,
    pub vertical_offset: f32,
    pub size_range: (f32, f32),
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            count: crate::constants::ORNAMENT_COUNT,
            height: crate::constants::TREE_HEIGHT,
            base_radius: crate::constants::TREE_BASE_RADIUS,
            vertical_offset: crate::constants::TRUNK_LIFT,
            size_range: (ORNAMENT_BASE_SIZE * 0.7, ORNAMENT_BASE_SIZE * 2.3),
        }
    }
}

/// Per-frame sway tuning. Frequencies are deliberately incommensurate so
/// the motion never visibly loops.
#[derive(Clone, Copy, Debug)]
pub struct SwayParams {
    pub amplitude: f32,
    pub freq_x: f32,
    pub freq_z: f32,
    pub freq_y: f32,
    pub vertical_factor: f32,
}

impl Default for SwayParams {
    fn default() -> Self {
        Self {
            amplitude: SWAY,
            freq_x: 1.6,
            freq_z: 1.4,
            freq_y: 2.1,
            vertical_factor: 0.4,
        }
    }
}

pub struct OrnamentField {
    ornaments: Vec<Ornament>,
    params: ConeParams,
    sway: SwayParams,
    instances: Vec<OrnamentInstance>,
}

impl OrnamentField {
    /// Build a field of `params.count` ornaments sampled area-uniformly
    /// inside the cone envelope. Deterministic for a given `seed`.
    pub fn new(params: ConeParams, palette: &[[f32; 3]], seed: u64) -> Result<Self, CardError> {
        require(params.height > 0.0, "cone height must be positive")?;
        require(params.base_radius > 0.0, "cone base radius must be positive")?;
        require(
            params.size_range.0 >= 0.0 && params.size_range.1 >= params.size_range.0,
            "size range must be non-negative and ordered",
        )?;
        require(
            params.height.is_finite() && params.base_radius.is_finite(),
            "cone dimensions must be finite",
        )?;
        require(!palette.is_empty(), "palette must not be empty")?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut ornaments = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            let y = rng.gen::<f32>() * params.height;
            let allowed = params.base_radius * (1.0 - y / params.height);
            // sqrt keeps the disk sampling area-uniform; linear would pile
            // baubles onto the trunk axis
            let r = rng.gen::<f32>().sqrt() * allowed;
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();

            let (lo, hi) = params.size_range;
            let size = lo + rng.gen::<f32>() * (hi - lo);

            ornaments.push(Ornament {
                base_position: Vec3::new(cos * r, y + params.vertical_offset, sin * r),
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                size,
                color: *palette.choose(&mut rng).unwrap_or(&palette[0]),
            });
        }

        let instances = vec![OrnamentInstance::default(); params.count];
        Ok(Self {
            ornaments,
            params,
            sway: SwayParams::default(),
            instances,
        })
    }

    pub fn set_sway(&mut self, sway: SwayParams) {
        self.sway = sway;
    }

    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    /// Allowed horizontal radius of the envelope at world height `y`.
    pub fn allowed_radius(&self, y: f32) -> f32 {
        let local = (y - self.params.vertical_offset).clamp(0.0, self.params.height);
        self.params.base_radius * (1.0 - local / self.params.height)
    }

    /// Advance the field to time `t` and return the per-ornament placements.
    ///
    /// Pure in `t`: only the transient output buffer is rewritten, base
    /// positions are never touched, and two calls with the same `t` yield
    /// identical output.
    pub fn step(&mut self, t: f32) -> &[OrnamentInstance] {
        let s = self.sway;
        let params = self.params;
        for (orn, out) in self.ornaments.iter().zip(self.instances.iter_mut()) {
            let amp = s.amplitude * (0.4 + orn.size * 6.0);
            let mut x = orn.base_position.x + (t * s.freq_x + orn.phase).sin() * amp;
            let mut z = orn.base_position.z + (t * s.freq_z + orn.phase).cos() * amp;
            let y = orn.base_position.y + (t * s.freq_y + orn.phase).sin() * amp * s.vertical_factor;

            // Sway is unconstrained by construction; pull any escapee back
            // onto the envelope at its displaced height.
            let local = (y - params.vertical_offset).clamp(0.0, params.height);
            let allowed = params.base_radius * (1.0 - local / params.height);
            let r = x.hypot(z);
            if r > allowed {
                let scale = allowed / (r + 1e-4);
                x *= scale;
                z *= scale;
            }

            out.position = Vec3::new(x, y, z);
            out.rotation = t * ORNAMENT_SPIN_RATE + orn.phase;
            out.scale = orn.size;
            out.color = orn.color;
        }
        &self.instances
    }
}
