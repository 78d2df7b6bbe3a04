#![cfg(target_arch = "wasm32")]

//! Browser entry point for the greeting card. Boots logging, acquires the
//! canvas and WebGPU, builds the scene, then hands control to the
//! requestAnimationFrame loop.

mod dom;
mod frame;
mod input;
mod labels;
mod music;
mod render;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use frame::Scene;
use render::GpuState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("card-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #card-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    // The surface needs 'static; the canvas lives for the page anyway
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = GpuState::new(leaked_canvas, frame::max_instances()).await?;

    let orbit: input::SharedOrbit = Rc::new(RefCell::new(None));
    input::attach(&canvas, orbit.clone());

    let scene = Rc::new(RefCell::new(Scene::new(&gpu, orbit)?));

    // Rasterize the greetings in the background; each label stays dormant
    // until its bitmap lands.
    let label_count = scene.borrow().labels.len();
    for i in 0..label_count {
        let scene = scene.clone();
        spawn_local(async move {
            let text = scene.borrow().labels[i].def.text;
            match labels::rasterize_text(text).await {
                Ok(rgba) => {
                    if let Err(e) = scene.borrow_mut().labels[i].reveal.set_source(rgba) {
                        log::error!("label {}: {}", i, e);
                    }
                }
                Err(e) => log::error!("label {} rasterize failed: {:?}", i, e),
            }
        });
    }

    let button = ui::create_music_button(&document)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    ui::wire_music_button(button);
    if let Err(e) = ui::style_credits(&document) {
        log::warn!("credits styling failed: {:?}", e);
    }

    frame::start_loop(gpu, scene, canvas);
    Ok(())
}
