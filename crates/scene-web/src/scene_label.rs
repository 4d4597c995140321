use web_sys as web;

/// How long the scene name stays on screen after a change.
pub const LABEL_VISIBLE_SEC: f32 = 2.0;

/// Transient "scene changed" label. Hidden again by a countdown advanced
/// from the frame loop rather than a browser timeout.
pub struct SceneLabel {
    element: Option<web::Element>,
    remaining: Option<f32>,
}

impl SceneLabel {
    pub fn new(document: &web::Document, element_id: Option<&str>) -> Self {
        let element = element_id.and_then(|id| document.get_element_by_id(id));
        if element_id.is_some() && element.is_none() {
            log::warn!("[scene] label element not found; scene names will not be shown");
        }
        if let Some(el) = &element {
            let _ = el.set_attribute("style", "opacity:0");
        }
        Self {
            element,
            remaining: None,
        }
    }

    pub fn show(&mut self, label: &str) {
        let Some(el) = &self.element else {
            return;
        };
        el.set_text_content(Some(label));
        let _ = el.set_attribute("style", "");
        self.remaining = Some(LABEL_VISIBLE_SEC);
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(remaining) = self.remaining.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.hide();
        }
    }

    pub fn hide(&mut self) {
        self.remaining = None;
        if let Some(el) = &self.element {
            let _ = el.set_attribute("style", "opacity:0");
        }
    }
}
