//! Falling snow around the tree: a box of points that drift down at a
//! constant rate and wrap back to the top below the ground plane.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{SNOW_CEILING, SNOW_EXTENT, SNOW_FALL_SPEED, SNOW_RESET_HEIGHT};
use crate::error::{require, CardError};

pub struct SnowField {
    flakes: Vec<Vec3>,
    fall_speed: f32,
}

impl SnowField {
    pub fn new(count: usize, seed: u64) -> Result<Self, CardError> {
        require(count > 0, "snow field needs at least one flake")?;
        let mut rng = StdRng::seed_from_u64(seed);
        let flakes = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SNOW_EXTENT,
                    rng.gen::<f32>() * SNOW_CEILING,
                    (rng.gen::<f32>() - 0.5) * SNOW_EXTENT,
                )
            })
            .collect();
        Ok(Self {
            flakes,
            fall_speed: SNOW_FALL_SPEED,
        })
    }

    pub fn flakes(&self) -> &[Vec3] {
        &self.flakes
    }

    /// Advance by `dt` seconds. Flakes that cross the ground respawn at the
    /// reset height, keeping their horizontal drift position.
    pub fn step(&mut self, dt: f32) {
        let fall = self.fall_speed * dt.max(0.0);
        for f in &mut self.flakes {
            f.y -= fall;
            if f.y < 0.0 {
                f.y = SNOW_RESET_HEIGHT;
            }
        }
    }
}
