//! Background music: fetch + decode the track on first demand, loop it
//! through a gain node, and pause/resume by suspending the AudioContext.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const MUSIC_GAIN: f32 = 0.35;

pub struct MusicPlayer {
    ctx: web::AudioContext,
    gain: web::GainNode,
    started: bool,
}

impl MusicPlayer {
    /// Build the audio graph. Must be called from a user gesture so the
    /// context starts in the running state.
    pub fn new() -> Result<Self, JsValue> {
        let ctx = web::AudioContext::new()?;
        let gain = ctx.create_gain()?;
        gain.gain().set_value(MUSIC_GAIN);
        gain.connect_with_audio_node(&ctx.destination())?;
        Ok(Self {
            ctx,
            gain,
            started: false,
        })
    }

    /// Fetch, decode and start the looping track.
    pub async fn load_and_play(&mut self, url: &str) -> Result<(), JsValue> {
        if self.started {
            return Ok(());
        }
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
        let resp: web::Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "music fetch failed: HTTP {}",
                resp.status()
            )));
        }
        let array_buf = JsFuture::from(resp.array_buffer()?).await?;
        let array_buf: js_sys::ArrayBuffer = array_buf.dyn_into()?;
        let decoded = JsFuture::from(self.ctx.decode_audio_data(&array_buf)?).await?;
        let buffer: web::AudioBuffer = decoded.dyn_into()?;

        let source = self.ctx.create_buffer_source()?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);
        source.connect_with_audio_node(&self.gain)?;
        source.start()?;
        self.started = true;
        Ok(())
    }

    /// Promise that suspends or resumes the context. Returned rather than
    /// awaited here so callers never hold a borrow across an await.
    pub fn pause_promise(&self, paused: bool) -> Result<js_sys::Promise, JsValue> {
        if paused {
            self.ctx.suspend()
        } else {
            self.ctx.resume()
        }
    }
}
