//! Pointer input: drag to orbit, wheel to dolly. The shared rig handle is
//! `None` until the intro glide lands, so input is a no-op during it.

use std::cell::RefCell;
use std::rc::Rc;

use card_core::OrbitRig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ROTATE_SPEED: f32 = 0.005; // radians per CSS pixel
const DOLLY_SPEED: f32 = 0.01; // world units per wheel delta unit

pub type SharedOrbit = Rc<RefCell<Option<OrbitRig>>>;

#[derive(Default)]
struct DragState {
    active: bool,
    last_x: f32,
    last_y: f32,
}

pub fn attach(canvas: &web::HtmlCanvasElement, orbit: SharedOrbit) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            d.active = true;
            d.last_x = ev.client_x() as f32;
            d.last_y = ev.client_y() as f32;
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let drag = drag.clone();
        let orbit = orbit.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.active {
                return;
            }
            let x = ev.client_x() as f32;
            let y = ev.client_y() as f32;
            let dx = x - d.last_x;
            let dy = y - d.last_y;
            d.last_x = x;
            d.last_y = y;
            if let Some(rig) = orbit.borrow_mut().as_mut() {
                rig.rotate(-dx * ROTATE_SPEED, -dy * ROTATE_SPEED);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    for event in ["pointerup", "pointerleave", "pointercancel"] {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |_: web::PointerEvent| {
            drag.borrow_mut().active = false;
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            if let Some(rig) = orbit.borrow_mut().as_mut() {
                rig.dolly(ev.delta_y() as f32 * DOLLY_SPEED);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
