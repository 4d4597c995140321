use glam::Vec2;
use web_sys as web;

/// Pointer position in client coordinates. Pointer events deref to
/// `MouseEvent`, so this serves mouse, pen and touch alike.
#[inline]
pub fn pointer_client(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Only the primary button (or a touch/pen contact) counts as a press.
#[inline]
pub fn is_primary_press(ev: &web::PointerEvent) -> bool {
    ev.is_primary() && ev.button() == 0
}
