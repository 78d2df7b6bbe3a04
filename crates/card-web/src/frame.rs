//! Per-frame scene assembly: advance the core simulations, pack every
//! particle into one instance list, and drive the render.

use std::cell::RefCell;
use std::rc::Rc;

use card_core::{
    ground_height, sparkle_positions, star_transform, Camera, IntroGlide, LightRig, OrbitRig,
    OrnamentField, SnowField, ConeParams, INTRO_DURATION, INTRO_START_DISTANCE, LABELS,
    ORNAMENT_COUNT, ORNAMENT_PALETTE, SNOW_COUNT, SPARKLE_COUNT,
};
use glam::Vec3;
use instant::Instant;
use rand::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input::SharedOrbit;
use crate::labels::CardLabel;
use crate::render::{GpuState, ParticleInstance};

const GROUND_COUNT: usize = 600;
const GROUND_RADIUS: f32 = 12.0;
const ORNAMENT_SEED: u64 = 42;
const SNOW_SEED: u64 = 7;
const SPARKLE_SEED: u64 = 11;
const GROUND_SEED: u64 = 23;
const JITTER_SEED: u64 = 3;

/// Key light direction matches the warm light the scene shader implies;
/// only its relation to the view direction matters for the boost.
fn key_light_dir() -> Vec3 {
    Vec3::new(6.0, 10.0, 8.0).normalize()
}

/// Upper bound on particles in one frame, used to size the instance buffer.
pub fn max_instances() -> usize {
    ORNAMENT_COUNT + SNOW_COUNT + SPARKLE_COUNT + GROUND_COUNT + 1 + LABELS.len()
}

pub struct Scene {
    ornaments: OrnamentField,
    snow: SnowField,
    sparkles: Vec<Vec3>,
    ground: Vec<Vec3>,
    pub labels: Vec<CardLabel>,
    intro: IntroGlide,
    orbit: SharedOrbit,
    lights: LightRig,
    instances: Vec<ParticleInstance>,
}

impl Scene {
    pub fn new(gpu: &GpuState, orbit: SharedOrbit) -> anyhow::Result<Self> {
        let ornaments = OrnamentField::new(ConeParams::default(), &ORNAMENT_PALETTE, ORNAMENT_SEED)?;
        let snow = SnowField::new(SNOW_COUNT, SNOW_SEED)?;
        let sparkles = sparkle_positions(SPARKLE_COUNT, SPARKLE_SEED);
        let ground = ground_cover(GROUND_COUNT, GROUND_SEED);

        let mut jitter_rng = StdRng::seed_from_u64(JITTER_SEED);
        let mut labels = Vec::with_capacity(LABELS.len());
        for def in LABELS {
            let seed = jitter_rng.gen::<f32>() * std::f32::consts::TAU;
            labels.push(CardLabel::new(gpu, def, 0.0, seed)?);
        }

        let intro = IntroGlide::new(
            card_core::final_camera_vec3(),
            card_core::look_target_vec3(),
            INTRO_DURATION,
        )?;

        Ok(Self {
            ornaments,
            snow,
            sparkles,
            ground,
            labels,
            intro,
            orbit,
            lights: LightRig::default(),
            instances: Vec::with_capacity(max_instances()),
        })
    }

    pub fn frame(
        &mut self,
        gpu: &mut GpuState,
        t: f32,
        dt: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let target = self.intro.target();
        let eye = if !self.intro.is_done() {
            let eye = self.intro.eye_at(t);
            if self.intro.is_done() {
                // Hand the camera over to the viewer at the rest pose
                *self.orbit.borrow_mut() = Some(OrbitRig::from_rest_pose(
                    self.intro.final_eye(),
                    target,
                    INTRO_START_DISTANCE,
                ));
            }
            eye
        } else {
            self.orbit
                .borrow()
                .as_ref()
                .map(|rig| rig.eye())
                .unwrap_or_else(|| self.intro.final_eye())
        };
        let camera = Camera::for_card(eye, target, gpu.aspect());

        let view_dir = (target - eye).normalize();
        let lights = self.lights.boosted(view_dir, key_light_dir());
        let ornament_glow = 0.12 + lights.camera_fill * 0.5;

        self.instances.clear();
        for inst in self.ornaments.step(t) {
            self.instances.push(ParticleInstance {
                pos: inst.position.to_array(),
                scale: inst.scale,
                color: [inst.color[0], inst.color[1], inst.color[2], 1.0],
                rotation: inst.rotation,
                glow: ornament_glow,
            });
        }

        self.snow.step(dt);
        for flake in self.snow.flakes() {
            self.instances.push(ParticleInstance {
                pos: flake.to_array(),
                scale: 0.05,
                color: [0.95, 0.97, 1.0, 0.9],
                rotation: 0.0,
                glow: 0.0,
            });
        }

        for p in &self.ground {
            self.instances.push(ParticleInstance {
                pos: p.to_array(),
                scale: 0.09,
                color: [0.88, 0.92, 1.0, 0.8],
                rotation: 0.0,
                glow: 0.0,
            });
        }

        for (i, p) in self.sparkles.iter().enumerate() {
            // Golden-angle phase offset decorrelates neighbouring twinkles
            let phase = i as f32 * 2.399_963;
            let twinkle = 0.5 + 0.5 * (t * 1.7 + phase).sin();
            self.instances.push(ParticleInstance {
                pos: p.to_array(),
                scale: 0.035,
                color: [0.9, 0.95, 1.0, 0.25 + 0.5 * twinkle],
                rotation: 0.0,
                glow: 1.0,
            });
        }

        let star = star_transform(t);
        self.instances.push(ParticleInstance {
            pos: star.position.to_array(),
            scale: 0.5 * star.scale,
            color: [1.0, 0.87, 0.45, 1.0],
            rotation: star.rotation,
            glow: 1.6,
        });

        for label in &mut self.labels {
            let mvp = camera.view_proj() * label.model_matrix(eye);
            gpu.set_label_uniforms(&label.gpu, mvp, [1.0, 1.0, 1.0, 1.0]);
            if label.finished {
                continue;
            }
            if let Some(reveal_frame) = label.reveal.step(t) {
                gpu.upload_label(&label.gpu, label.reveal.output());
                if reveal_frame.progress >= 1.0 {
                    label.finished = true;
                } else {
                    let pen = label.pen_world(&reveal_frame, eye, t);
                    self.instances.push(ParticleInstance {
                        pos: pen.to_array(),
                        scale: 0.07,
                        color: [1.0, 0.93, 0.75, 1.0],
                        rotation: 0.0,
                        glow: 1.3,
                    });
                }
            }
        }

        let label_gpus: Vec<_> = self.labels.iter().map(|l| &l.gpu).collect();
        gpu.render(&camera, &self.instances, &label_gpus)
    }
}

/// Static snow-cover points lying on the displaced ground.
fn ground_cover(count: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r = GROUND_RADIUS * rng.gen::<f32>().sqrt();
            let a = rng.gen::<f32>() * std::f32::consts::TAU;
            let x = a.cos() * r;
            let z = a.sin() * r;
            Vec3::new(x, ground_height(x, z, GROUND_RADIUS) + 0.03, z)
        })
        .collect()
}

/// Drive the scene from requestAnimationFrame until the page goes away.
pub fn start_loop(
    mut gpu: GpuState<'static>,
    scene: Rc<RefCell<Scene>>,
    canvas: web::HtmlCanvasElement,
) {
    let start = Instant::now();
    let mut last = start;
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = Instant::now();
        let t = (now - start).as_secs_f32();
        let dt = (now - last).as_secs_f32();
        last = now;

        gpu.resize_if_needed(canvas.width(), canvas.height());
        if let Err(e) = scene.borrow_mut().frame(&mut gpu, t, dt) {
            log::error!("render error: {:?}", e);
        }

        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
