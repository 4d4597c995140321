use anyhow::anyhow;
use scene_core::{ThemeColors, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Window width (CSS px) below which the compact entity counts are used.
const COMPACT_MAX_WIDTH: f64 = 768.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Canvas rectangle in client coordinates, the space pointer events report in.
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        if canvas.width() != w_px.max(1) || canvas.height() != h_px.max(1) {
            canvas.set_width(w_px.max(1));
            canvas.set_height(h_px.max(1));
        }
    }
}

pub fn is_compact_device() -> bool {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w < COMPACT_MAX_WIDTH)
        .unwrap_or(false)
}

/// Reads `{ primary, secondary, accent, hover }` hex strings from a JS
/// object. Missing fields, `undefined` or `null` leave the default in place.
pub fn theme_from_js(value: &JsValue) -> ThemeColors {
    if value.is_undefined() || value.is_null() {
        return ThemeColors::default();
    }
    let field = |name: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    ThemeColors {
        primary: field("primary"),
        secondary: field("secondary"),
        accent: field("accent"),
        hover: field("hover"),
    }
}
