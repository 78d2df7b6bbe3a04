//! DOM chrome: the floating music toggle button and the credits overlay.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::music::MusicPlayer;

const MUSIC_URL: &str = "assets/music.mp3";

#[derive(Clone, Copy, PartialEq)]
enum MusicState {
    Idle,
    Loading,
    Playing,
    Paused,
    Failed,
}

pub fn create_music_button(document: &web::Document) -> Result<web::HtmlButtonElement, JsValue> {
    let button: web::HtmlButtonElement = document
        .create_element("button")?
        .dyn_into::<web::HtmlButtonElement>()?;
    button.set_id("music-toggle");
    button.set_text_content(Some("Play music"));

    let style = button.style();
    for (prop, value) in [
        ("position", "fixed"),
        ("top", "18px"),
        ("right", "18px"),
        ("z-index", "10"),
        ("padding", "10px 18px"),
        ("border", "1px solid rgba(241, 250, 238, 0.35)"),
        ("border-radius", "999px"),
        ("background", "rgba(12, 16, 28, 0.7)"),
        ("color", "#f1faee"),
        ("font", "14px system-ui, sans-serif"),
        ("cursor", "pointer"),
    ] {
        style.set_property(prop, value)?;
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&button)?;
    Ok(button)
}

/// Style the host-provided `#credits` element into a floating pill at the
/// bottom of the page. Pages without one get no overlay.
pub fn style_credits(document: &web::Document) -> Result<(), JsValue> {
    let Some(credits) = document.get_element_by_id("credits") else {
        return Ok(());
    };
    let credits: web::HtmlElement = credits.dyn_into::<web::HtmlElement>()?;

    let style = credits.style();
    for (prop, value) in [
        ("position", "fixed"),
        ("left", "50%"),
        ("bottom", "12px"),
        ("transform", "translateX(-50%)"),
        ("padding", "8px 12px"),
        ("background", "rgba(0, 0, 0, 0.35)"),
        ("backdrop-filter", "blur(8px)"),
        ("border-radius", "10px"),
        ("color", "#e9f4ff"),
        ("font-family", "Inter, system-ui, -apple-system, sans-serif"),
        ("font-size", "12px"),
        ("line-height", "1.5"),
        ("white-space", "nowrap"),
        ("z-index", "20"),
        ("box-shadow", "0 10px 28px rgba(0, 0, 0, 0.25)"),
    ] {
        style.set_property(prop, value)?;
    }

    let links = credits.query_selector_all("a")?;
    for i in 0..links.length() {
        let Some(node) = links.item(i) else { continue };
        let link: web::HtmlElement = node.dyn_into::<web::HtmlElement>()?;
        let style = link.style();
        style.set_property("color", "#b9e0ff")?;
        style.set_property("text-decoration", "none")?;
        style.set_property("padding", "0 2px")?;
    }
    Ok(())
}

/// Wire the toggle: first click builds the audio graph and starts the
/// track, later clicks suspend/resume the context.
pub fn wire_music_button(button: web::HtmlButtonElement) {
    let state = Rc::new(RefCell::new(MusicState::Idle));
    let player: Rc<RefCell<Option<MusicPlayer>>> = Rc::new(RefCell::new(None));

    let btn = button.clone();
    let closure = Closure::wrap(Box::new(move || {
        let current = *state.borrow();
        match current {
            MusicState::Idle | MusicState::Failed => {
                *state.borrow_mut() = MusicState::Loading;
                btn.set_text_content(Some("Loading..."));
                let state = state.clone();
                let player = player.clone();
                let btn = btn.clone();
                spawn_local(async move {
                    let result = async {
                        let mut p = MusicPlayer::new()?;
                        p.load_and_play(MUSIC_URL).await?;
                        Ok::<MusicPlayer, JsValue>(p)
                    }
                    .await;
                    match result {
                        Ok(p) => {
                            *player.borrow_mut() = Some(p);
                            *state.borrow_mut() = MusicState::Playing;
                            btn.set_text_content(Some("Pause music"));
                        }
                        Err(e) => {
                            log::error!("music start failed: {:?}", e);
                            *state.borrow_mut() = MusicState::Failed;
                            btn.set_text_content(Some("Load failed"));
                            revert_after_failure(state.clone(), btn.clone());
                        }
                    }
                });
            }
            MusicState::Playing => {
                *state.borrow_mut() = MusicState::Paused;
                btn.set_text_content(Some("Play music"));
                toggle_pause(player.clone(), true);
            }
            MusicState::Paused => {
                *state.borrow_mut() = MusicState::Playing;
                btn.set_text_content(Some("Pause music"));
                toggle_pause(player.clone(), false);
            }
            MusicState::Loading => {}
        }
    }) as Box<dyn FnMut()>);
    let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// After a failed load the button reads "Load failed" for a moment, then
/// falls back to the idle label so the viewer knows a retry is possible.
fn revert_after_failure(state: Rc<RefCell<MusicState>>, btn: web::HtmlButtonElement) {
    let cb = Closure::once_into_js(move || {
        // a retry may already be in flight
        if *state.borrow() == MusicState::Failed {
            btn.set_text_content(Some("Play music"));
        }
    });
    if let Some(window) = web::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            1500,
        );
    }
}

fn toggle_pause(player: Rc<RefCell<Option<MusicPlayer>>>, paused: bool) {
    let promise = player.borrow().as_ref().map(|p| p.pause_promise(paused));
    spawn_local(async move {
        let result = match promise {
            Some(Ok(p)) => wasm_bindgen_futures::JsFuture::from(p).await.map(|_| ()),
            Some(Err(e)) => Err(e),
            None => Ok(()),
        };
        if let Err(e) = result {
            log::error!("music toggle failed: {:?}", e);
        }
    });
}
