use glam::Vec3;

// Shared scene tuning constants used by the web frontend and the tests.

// Tree / ornament field
pub const ORNAMENT_COUNT: usize = 2600;
pub const TREE_HEIGHT: f32 = 9.0;
pub const TREE_BASE_RADIUS: f32 = 4.3;
pub const TRUNK_LIFT: f32 = 1.4; // cone base sits this far above the ground
pub const ORNAMENT_BASE_SIZE: f32 = 0.055;
pub const SWAY: f32 = 0.1;
pub const ORNAMENT_SPIN_RATE: f32 = 0.4; // rad/s added per unit time, offset by phase

// Bauble palette (sRGB, from the card's art direction)
pub const ORNAMENT_PALETTE: [[f32; 3]; 7] = [
    [0.902, 0.224, 0.275], // #e63946
    [1.000, 0.745, 0.043], // #ffbe0b
    [0.165, 0.616, 0.561], // #2a9d8f
    [0.227, 0.525, 1.000], // #3a86ff
    [1.000, 0.000, 0.431], // #ff006e
    [0.514, 0.220, 0.925], // #8338ec
    [0.945, 0.980, 0.933], // #f1faee
];

// Star on top
pub const STAR_POSITION: [f32; 3] = [0.0, 9.4, 0.0];
pub const STAR_SPIN_RATE: f32 = 0.6;
pub const STAR_PULSE_FREQ: f32 = 3.0;
pub const STAR_PULSE_AMOUNT: f32 = 0.05;

// Snow
pub const SNOW_COUNT: usize = 1500;
pub const SNOW_EXTENT: f32 = 40.0; // x/z span, centered on the tree
pub const SNOW_CEILING: f32 = 25.0;
pub const SNOW_RESET_HEIGHT: f32 = 20.0;
pub const SNOW_FALL_SPEED: f32 = 1.8; // world units per second

// Background sparkles
pub const SPARKLE_COUNT: usize = 900;
pub const SPARKLE_RADIUS: f32 = 30.0;

// Camera rig
pub const LOOK_TARGET: [f32; 3] = [0.0, 4.5, 0.0];
pub const FINAL_CAMERA_POSITION: [f32; 3] = [0.0, 5.5, 14.0];
pub const INTRO_START_DISTANCE: f32 = 3.4; // eye starts this close along the final axis
pub const INTRO_DURATION: f32 = 3.0;
pub const ORBIT_AZIMUTH_LIMIT_DEG: f32 = 30.0;
pub const ORBIT_POLAR_LIMIT_DEG: f32 = 15.0;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Handwriting labels
pub const LABEL_CANVAS_WIDTH: u32 = 1024;
pub const LABEL_CANVAS_HEIGHT: u32 = 256;
pub const LABEL_PADDING: u32 = 60;
pub const LABEL_BASELINE_FRAC: f32 = 0.62;
pub const LABEL_FEATHER_RADIUS: f32 = 80.0;
pub const LABEL_FONT_PX: u32 = 140;
pub const PEN_JITTER_FREQ: f32 = 6.0;
pub const PEN_JITTER_AMOUNT: f32 = 0.02;

/// One greeting to write across the card.
#[derive(Clone, Copy, Debug)]
pub struct LabelDef {
    pub text: &'static str,
    pub position: [f32; 3],
    pub width: f32,
    pub height: f32,
    pub duration: f32,
    pub delay: f32,
}

pub const LABELS: [LabelDef; 3] = [
    LabelDef {
        text: "Joyeux Noël",
        position: [-7.2, 5.0, 0.2],
        width: 5.6,
        height: 1.6,
        duration: 3.0,
        delay: 1.3,
    },
    LabelDef {
        text: "Bonne Année",
        position: [7.2, 5.5, 0.2],
        width: 6.6,
        height: 1.6,
        duration: 3.4,
        delay: 4.3,
    },
    LabelDef {
        text: "2026",
        position: [7.2, 4.5, 0.2],
        width: 6.6,
        height: 1.6,
        duration: 2.0,
        delay: 6.3,
    },
];

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.2;
pub const BLOOM_STRENGTH: f32 = 0.8;

// Night-sky background, matches the page gradient
pub const CLEAR_COLOR: [f64; 4] = [0.027, 0.039, 0.071, 1.0];

#[inline]
pub fn look_target_vec3() -> Vec3 {
    Vec3::from(LOOK_TARGET)
}

#[inline]
pub fn final_camera_vec3() -> Vec3 {
    Vec3::from(FINAL_CAMERA_POSITION)
}
