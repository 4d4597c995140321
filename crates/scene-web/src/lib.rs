#![cfg(target_arch = "wasm32")]
//! Browser front-end: wires DOM input and a `requestAnimationFrame` loop to
//! `scene_core::Background` and hands each frame's instances to a JS renderer.

mod dom;
mod events;
mod frame;
mod input;
mod keys;
mod scene_label;

use events::Listener;
use frame::{FrameContext, FrameLoop};
use instant::Instant;
use scene_core::{Background, SceneConfig};
use scene_label::SceneLabel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");
    Ok(())
}

/// One animated background mounted on a canvas.
///
/// JS usage:
/// ```js
/// const bg = new HeroBackground("hero-canvas", theme, (instances, count, kind) => draw(...), "scene-label");
/// bg.unmount();
/// ```
#[wasm_bindgen]
pub struct HeroBackground {
    background: Rc<RefCell<Background>>,
    frame: FrameLoop,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl HeroBackground {
    /// `on_frame(instances: Float32Array, count: number, kind: number)` is
    /// called once per animation frame; `on_scene_change(label)` whenever
    /// the scene switches.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        theme: JsValue,
        on_frame: js_sys::Function,
        label_element_id: Option<String>,
        on_scene_change: Option<js_sys::Function>,
    ) -> Result<HeroBackground, JsValue> {
        init(canvas_id, &theme, on_frame, label_element_id.as_deref(), on_scene_change).map_err(|e| {
            log::error!("init error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    #[wasm_bindgen(js_name = advanceScene)]
    pub fn advance_scene(&self) -> bool {
        self.background
            .try_borrow_mut()
            .map(|mut bg| bg.advance_scene())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: JsValue) {
        if let Ok(mut bg) = self.background.try_borrow_mut() {
            bg.set_theme(&dom::theme_from_js(&theme));
            log::info!("[theme] palette updated");
        }
    }

    #[wasm_bindgen(js_name = setInteractionEnabled)]
    pub fn set_interaction_enabled(&self, enabled: bool) {
        if let Ok(mut bg) = self.background.try_borrow_mut() {
            bg.set_interaction_enabled(enabled);
        }
    }

    /// Stop the frame loop, detach listeners and release every entity.
    pub fn unmount(&mut self) {
        self.frame.stop();
        self.listeners.clear();
        if let Ok(mut bg) = self.background.try_borrow_mut() {
            bg.unmount();
        }
    }
}

fn init(
    canvas_id: &str,
    theme: &JsValue,
    on_frame: js_sys::Function,
    label_element_id: Option<&str>,
    on_scene_change: Option<js_sys::Function>,
) -> anyhow::Result<HeroBackground> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);

    let compact = dom::is_compact_device();
    let config = SceneConfig {
        theme: dom::theme_from_js(theme),
        ..SceneConfig::for_device(compact).with_seed(random_seed())
    };
    let viewport = dom::canvas_viewport(&canvas);
    log::info!(
        "[scene] mounting on #{canvas_id} ({}x{}, {})",
        viewport.width,
        viewport.height,
        if compact { "compact" } else { "desktop" }
    );
    let background = Rc::new(RefCell::new(Background::new(config, viewport)));

    let mut listeners = events::wire_pointer_handlers(&canvas, &background)?;
    listeners.push(events::wire_keyboard(&background)?);

    let ctx = FrameContext {
        background: background.clone(),
        label: SceneLabel::new(&document, label_element_id),
        last_rect: (viewport.left, viewport.top, viewport.width, viewport.height),
        canvas,
        on_frame,
        on_scene_change,
        last_instant: Instant::now(),
    };
    let frame = FrameLoop::start(ctx)?;

    Ok(HeroBackground {
        background,
        frame,
        listeners,
    })
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn!("[scene] getrandom failed ({e}); using the default seed");
            SceneConfig::default().seed
        }
    }
}
