use super::Listener;
use crate::input;
use scene_core::Background;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire pointer input to the background. Movement and release are watched
/// on the window so the pointer keeps driving the scene over page content;
/// presses and clicks only count on the canvas itself.
pub fn wire_pointer_handlers(
    canvas: &web::HtmlCanvasElement,
    background: &Rc<RefCell<Background>>,
) -> anyhow::Result<Vec<Listener>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let window_target: &web::EventTarget = window.unchecked_ref();
    let canvas_target: &web::EventTarget = canvas.unchecked_ref();
    let mut listeners = Vec::with_capacity(6);

    // pointermove
    {
        let bg = background.clone();
        listeners.push(Listener::new(window_target, "pointermove", move |ev: web::PointerEvent| {
            let p = input::pointer_client(&ev);
            if let Ok(mut bg) = bg.try_borrow_mut() {
                bg.pointer_move(p.x, p.y);
            }
        })?);
    }

    // pointerdown
    {
        let bg = background.clone();
        listeners.push(Listener::new(canvas_target, "pointerdown", move |ev: web::PointerEvent| {
            if !input::is_primary_press(&ev) {
                return;
            }
            let p = input::pointer_client(&ev);
            if let Ok(mut bg) = bg.try_borrow_mut() {
                bg.pointer_down(p.x, p.y);
            }
        })?);
    }

    // pointerup / pointercancel
    for kind in ["pointerup", "pointercancel"] {
        let bg = background.clone();
        listeners.push(Listener::new(window_target, kind, move |_ev: web::PointerEvent| {
            if let Ok(mut bg) = bg.try_borrow_mut() {
                bg.pointer_up();
            }
        })?);
    }

    // leaving the page
    if let Some(root) = document.document_element() {
        let bg = background.clone();
        let root_target: &web::EventTarget = root.unchecked_ref();
        listeners.push(Listener::new(root_target, "pointerleave", move |_ev: web::PointerEvent| {
            if let Ok(mut bg) = bg.try_borrow_mut() {
                bg.pointer_leave();
            }
        })?);
    }

    // click advances the scene
    {
        let bg = background.clone();
        listeners.push(Listener::new(canvas_target, "click", move |_ev: web::MouseEvent| {
            match bg.try_borrow_mut() {
                Ok(mut bg) => {
                    bg.advance_scene();
                }
                Err(_) => log::debug!("[pointer] click dropped while the frame is running"),
            }
        })?);
    }

    Ok(listeners)
}
