//! Handwriting labels: rasterize the greeting text once with Canvas2D,
//! then drive the reveal from card-core and keep the GPU texture in sync.

use card_core::{
    HandwritingReveal, LabelDef, RevealFrame, RevealParams, LABEL_CANVAS_HEIGHT,
    LABEL_CANVAS_WIDTH, LABEL_FONT_PX, LABEL_PADDING,
};
use glam::{Mat4, Vec3};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::render::{GpuState, LabelGpu};

const LABEL_FONT_FAMILY: &str = "Parisienne, cursive";
const LABEL_FILL: &str = "#fff7e6";
const LABEL_GLOW: &str = "rgba(255, 215, 130, 0.85)";

pub struct CardLabel {
    pub def: LabelDef,
    pub reveal: HandwritingReveal,
    pub gpu: LabelGpu,
    /// Set once the final (fully revealed) bitmap has been uploaded, so we
    /// stop re-compositing and re-uploading a finished label.
    pub finished: bool,
}

impl CardLabel {
    pub fn new(
        gpu: &GpuState,
        def: LabelDef,
        created_at: f32,
        jitter_seed: f32,
    ) -> anyhow::Result<Self> {
        let reveal = HandwritingReveal::new(
            RevealParams::new(def.duration, def.delay),
            created_at,
            jitter_seed,
        )?;
        let label_gpu = gpu.create_label(LABEL_CANVAS_WIDTH, LABEL_CANVAS_HEIGHT);
        Ok(Self {
            def,
            reveal,
            gpu: label_gpu,
            finished: false,
        })
    }

    /// Billboard model matrix: the quad always faces the camera eye, scaled
    /// to the label's world size.
    pub fn model_matrix(&self, eye: Vec3) -> Mat4 {
        let pos = Vec3::from(self.def.position);
        let (right, up, forward) = billboard_basis(pos, eye);
        Mat4::from_cols(
            (right * self.def.width).extend(0.0),
            (up * self.def.height).extend(0.0),
            forward.extend(0.0),
            pos.extend(1.0),
        )
    }

    /// World-space position of the pen tip for this frame, nudged toward
    /// the camera so it draws in front of the glyphs.
    pub fn pen_world(&self, frame: &RevealFrame, eye: Vec3, t: f32) -> Vec3 {
        let params = self.reveal.params();
        let pos = Vec3::from(self.def.position);
        let (right, up, forward) = billboard_basis(pos, eye);
        let u = frame.pen_x / params.width as f32;
        let v = frame.pen_y / params.height as f32;
        let local_x = (u - 0.5) * self.def.width;
        let local_y = (0.5 - v) * self.def.height;
        pos + right * local_x
            + up * (local_y + self.reveal.pen_jitter(t))
            + forward * 0.05
    }
}

fn billboard_basis(pos: Vec3, eye: Vec3) -> (Vec3, Vec3, Vec3) {
    let forward = (eye - pos).normalize();
    let right = Vec3::Y.cross(forward).normalize();
    let up = forward.cross(right);
    (right, up, forward)
}

/// Rasterize one greeting into an RGBA bitmap via an offscreen 2D canvas.
///
/// Waits for the script font to load when the browser supports the CSS
/// Font Loading API; on failure it draws anyway with the cursive fallback.
pub async fn rasterize_text(text: &str) -> Result<Vec<u8>, JsValue> {
    let document = crate::dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;

    let font = format!("{}px {}", LABEL_FONT_PX, LABEL_FONT_FAMILY);
    if let Ok(promise) = document.fonts().load(&font) {
        if JsFuture::from(promise).await.is_err() {
            log::warn!("font load failed, drawing with fallback");
        }
    }

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into::<web::HtmlCanvasElement>()?;
    canvas.set_width(LABEL_CANVAS_WIDTH);
    canvas.set_height(LABEL_CANVAS_HEIGHT);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()?;

    let w = LABEL_CANVAS_WIDTH as f64;
    let h = LABEL_CANVAS_HEIGHT as f64;
    let baseline = h * card_core::LABEL_BASELINE_FRAC as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_font(&font);
    // Left-aligned at the padding column: the reveal cutoff and the pen tip
    // both start there, so the ink must too.
    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");
    ctx.set_shadow_color(LABEL_GLOW);
    ctx.set_shadow_blur(18.0);
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.fill_text(text, LABEL_PADDING as f64, baseline)?;

    let image = ctx.get_image_data(0.0, 0.0, w, h)?;
    Ok(image.data().0)
}
