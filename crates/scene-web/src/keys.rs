// Keyboard shortcuts, kept free of browser types so they test on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    AdvanceScene,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "n" | "N" => Some(KeyAction::AdvanceScene),
        _ => None,
    }
}
