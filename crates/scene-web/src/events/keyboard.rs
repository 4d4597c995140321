use super::Listener;
use crate::keys::{action_for_key, KeyAction};
use scene_core::Background;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keyboard shortcut for switching scenes. Ignored while focus is in a
/// text field so typing on the page never changes the background.
pub fn wire_keyboard(background: &Rc<RefCell<Background>>) -> anyhow::Result<Listener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let bg = background.clone();
    Listener::new(window.unchecked_ref(), "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() || is_typing(&ev) {
            return;
        }
        match action_for_key(&ev.key()) {
            Some(KeyAction::AdvanceScene) => {
                if let Ok(mut bg) = bg.try_borrow_mut() {
                    bg.advance_scene();
                }
            }
            None => {}
        }
    })
}

fn is_typing(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") || el.has_attribute("contenteditable"))
        .unwrap_or(false)
}
