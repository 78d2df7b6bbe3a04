//! Progressive handwriting reveal over a pre-rendered glyph bitmap.
//!
//! The glyph run is rasterized once by an external font layer and handed in
//! as an RGBA bitmap. Each frame we rebuild an alpha mask that is opaque
//! left of a moving cutoff column, with a radial feather at the writing
//! front simulating an ink-tip glow, and composite `source ∩ mask` into the
//! output buffer. Until the source arrives the label is dormant and `step`
//! is a no-op.

use crate::constants::{
    LABEL_BASELINE_FRAC, LABEL_CANVAS_HEIGHT, LABEL_CANVAS_WIDTH, LABEL_FEATHER_RADIUS,
    LABEL_PADDING, PEN_JITTER_AMOUNT, PEN_JITTER_FREQ,
};
use crate::error::{require, CardError};

#[derive(Clone, Copy, Debug)]
pub struct RevealParams {
    pub width: u32,
    pub height: u32,
    pub duration: f32,
    pub delay: f32,
    pub padding: u32,
    pub baseline: u32,
    pub feather: f32,
}

impl RevealParams {
    pub fn new(duration: f32, delay: f32) -> Self {
        Self {
            width: LABEL_CANVAS_WIDTH,
            height: LABEL_CANVAS_HEIGHT,
            duration,
            delay,
            padding: LABEL_PADDING,
            baseline: (LABEL_CANVAS_HEIGHT as f32 * LABEL_BASELINE_FRAC) as u32,
            feather: LABEL_FEATHER_RADIUS,
        }
    }
}

/// One frame of reveal output. The composited bitmap itself is read via
/// [`HandwritingReveal::output`].
#[derive(Clone, Copy, Debug)]
pub struct RevealFrame {
    pub progress: f32,
    /// Reveal front in bitmap columns.
    pub cutoff_x: f32,
    /// Pen-tip marker in bitmap pixels, on the text baseline.
    pub pen_x: f32,
    pub pen_y: f32,
}

pub struct HandwritingReveal {
    params: RevealParams,
    created_at: f32,
    jitter_seed: f32,
    source: Option<Vec<u8>>,
    mask: Vec<u8>,
    output: Vec<u8>,
    start_time: Option<f32>,
    progress: f32,
}

impl HandwritingReveal {
    /// `created_at` is the driver clock value at construction; the delay
    /// window is measured from it until the start time latches.
    pub fn new(params: RevealParams, created_at: f32, jitter_seed: f32) -> Result<Self, CardError> {
        require(params.width > 0 && params.height > 0, "bitmap must be non-empty")?;
        require(params.duration > 0.0, "duration must be positive")?;
        require(
            params.delay >= 0.0 && params.delay.is_finite(),
            "delay must be non-negative and finite",
        )?;
        require(
            params.padding * 2 < params.width,
            "padding must leave room for the glyph run",
        )?;
        require(params.baseline < params.height, "baseline must be inside the bitmap")?;
        require(params.feather > 0.0, "feather radius must be positive")?;

        let px = (params.width * params.height) as usize;
        Ok(Self {
            params,
            created_at,
            jitter_seed,
            source: None,
            mask: vec![0; px],
            output: vec![0; px * 4],
            start_time: None,
            progress: 0.0,
        })
    }

    /// Completion callback of the external glyph rasterizer. Until this is
    /// called the label stays dormant and fully hidden.
    pub fn set_source(&mut self, rgba: Vec<u8>) -> Result<(), CardError> {
        let expect = (self.params.width * self.params.height) as usize * 4;
        require(rgba.len() == expect, "source bitmap size mismatch")?;
        self.source = Some(rgba);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn params(&self) -> &RevealParams {
        &self.params
    }

    /// Composited RGBA output (source clipped by the reveal mask).
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Current mask alphas, one byte per pixel. Exposed for the tests.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Vertical hand-tremor offset for the pen-tip marker, in world units.
    pub fn pen_jitter(&self, t: f32) -> f32 {
        (t * PEN_JITTER_FREQ + self.jitter_seed).sin() * PEN_JITTER_AMOUNT
    }

    /// Advance the reveal to time `t`.
    ///
    /// Dormant while no source bitmap is set, and while `t` is inside the
    /// delay window measured from creation. The first eligible call latches
    /// `start_time = t + delay`; this is measured from the call, not from
    /// construction, so a driver that starts updating late shifts the whole
    /// animation rather than skipping into it.
    pub fn step(&mut self, t: f32) -> Option<RevealFrame> {
        self.source.as_ref()?;
        if self.start_time.is_none() {
            if t < self.created_at + self.params.delay {
                return None;
            }
            self.start_time = Some(t + self.params.delay);
        }
        let start = self.start_time.expect("latched above");
        let local = t - start;
        if local < 0.0 {
            return None;
        }

        self.progress = (local / self.params.duration).clamp(0.0, 1.0);
        let cutoff = self.cutoff_x();
        self.rebuild_mask(cutoff);
        self.composite();

        Some(RevealFrame {
            progress: self.progress,
            cutoff_x: cutoff,
            pen_x: cutoff,
            pen_y: self.params.baseline as f32,
        })
    }

    fn cutoff_x(&self) -> f32 {
        let min_x = self.params.padding as f32;
        let max_x = (self.params.width - self.params.padding) as f32;
        min_x + (max_x - min_x) * self.progress
    }

    fn rebuild_mask(&mut self, cutoff: f32) {
        let w = self.params.width as usize;
        let h = self.params.height as usize;
        let baseline = self.params.baseline as f32;
        let feather = self.params.feather;
        let solid_cols = (cutoff.max(0.0) as usize).min(w);

        for row in 0..h {
            let base = row * w;
            self.mask[base..base + solid_cols].fill(255);

            let dy = row as f32 - baseline;
            for col in solid_cols..w {
                let dx = col as f32 - cutoff;
                let d = dx.hypot(dy);
                let a = (1.0 - d / feather).clamp(0.0, 1.0);
                self.mask[base + col] = (a * 255.0) as u8;
            }
        }
    }

    fn composite(&mut self) {
        let src = self.source.as_ref().expect("checked by step");
        for (i, &m) in self.mask.iter().enumerate() {
            let o = i * 4;
            self.output[o] = src[o];
            self.output[o + 1] = src[o + 1];
            self.output[o + 2] = src[o + 2];
            // destination-in: output alpha is the product of the two layers
            self.output[o + 3] = ((src[o + 3] as u16 * m as u16) / 255) as u8;
        }
    }
}
