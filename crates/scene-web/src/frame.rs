use crate::dom;
use crate::scene_label::SceneLabel;
use instant::Instant;
use scene_core::{Background, SceneEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Everything one animation frame touches.
pub struct FrameContext {
    pub background: Rc<RefCell<Background>>,
    pub canvas: web::HtmlCanvasElement,
    pub on_frame: js_sys::Function,
    pub on_scene_change: Option<js_sys::Function>,
    pub label: SceneLabel,
    pub last_instant: Instant,
    pub last_rect: (f32, f32, f32, f32),
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.sync_viewport();

        // Collect everything needed from the background, then release the
        // borrow before calling back into JS.
        let (instances, count, kind, events) = {
            let mut bg = self.background.borrow_mut();
            bg.tick(dt_sec);
            let floats = js_sys::Float32Array::from(bg.instance_floats());
            (floats, bg.instances().len(), bg.active_kind().index(), bg.drain_events())
        };

        for ev in &events {
            match ev {
                SceneEvent::SceneChanged { label, .. } => {
                    self.label.show(label);
                    if let Some(cb) = &self.on_scene_change {
                        if let Err(e) = cb.call1(&JsValue::NULL, &JsValue::from_str(label)) {
                            log::error!("[scene] onSceneChange error: {:?}", e);
                        }
                    }
                }
                SceneEvent::EasterEggStarted | SceneEvent::EasterEggEnded => {}
            }
        }
        self.label.tick(dt_sec);

        if let Err(e) = self.on_frame.call3(
            &JsValue::NULL,
            &instances,
            &JsValue::from(count as u32),
            &JsValue::from(kind as u32),
        ) {
            log::error!("[scene] onFrame error: {:?}", e);
        }
    }

    fn sync_viewport(&mut self) {
        let vp = dom::canvas_viewport(&self.canvas);
        let rect = (vp.left, vp.top, vp.width, vp.height);
        if rect == self.last_rect {
            return;
        }
        self.last_rect = rect;
        dom::sync_canvas_backing_size(&self.canvas);
        if let Ok(mut bg) = self.background.try_borrow_mut() {
            bg.set_viewport(vp);
        }
    }
}

/// `requestAnimationFrame` driver. The pending frame id is kept so the loop
/// can be cancelled on unmount.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(mut ctx: FrameContext) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        let running_clone = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            if !running_clone.get() {
                return;
            }
            ctx.frame();
            if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
                raf_clone.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));

        let first = tick
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()
            .map_err(|e| anyhow::anyhow!(format!("requestAnimationFrame: {:?}", e)))?;
        raf_id.set(first);

        Ok(Self { tick, raf_id, running })
    }

    /// Cancel the pending frame and drop the loop closure.
    pub fn stop(&mut self) {
        self.running.set(false);
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
