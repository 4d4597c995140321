//! Theme-driven material colors.
//!
//! All hue/saturation/lightness values are in 0..1. Main and emissive colors
//! are sRGB triples in 0..1.

use crate::constants::{
    DEFAULT_ACCENT_HEX, DEFAULT_HOVER_HEX, DEFAULT_PRIMARY_HEX, DEFAULT_SECONDARY_HEX,
    DIRECTION_DECAY, DIRECTION_MIN_INTENSITY, EMISSIVE_HUE_OFFSET, EMISSIVE_MAX_INTENSITY,
    EXCITED_LIGHTNESS, EXCITED_SATURATION,
};
use crate::entity::ShapeKind;
use glam::Vec3;
use std::f32::consts::TAU;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("empty color string")]
    Empty,
    #[error("expected 3 or 6 hex digits, found {0}")]
    InvalidLength(usize),
    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional) into an RGB triple.
pub fn parse_hex(input: &str) -> Result<Vec3, ThemeError> {
    let digits = input.trim().trim_start_matches('#');
    if digits.is_empty() {
        return Err(ThemeError::Empty);
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ThemeError::InvalidDigit(input.to_string()));
    }
    let channel = |s: &str| {
        u8::from_str_radix(s, 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ThemeError::InvalidDigit(input.to_string()))
    };
    match digits.len() {
        6 => Ok(Vec3::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Ok(Vec3::new(expand(0)?, expand(1)?, expand(2)?))
        }
        n => Err(ThemeError::InvalidLength(n)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn from_rgb(rgb: Vec3) -> Self {
        let (r, g, b) = (rgb.x, rgb.y, rgb.z);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        if (max - min).abs() <= f32::EPSILON {
            return Self { h: 0.0, s: 0.0, l };
        }
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        Self { h: h / 6.0, s, l }
    }

    /// Convert to RGB. Hue wraps; saturation and lightness are clamped.
    pub fn to_rgb(self) -> Vec3 {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Vec3::splat(l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Vec3::new(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Theme color overrides as supplied by the host page. Missing or
/// malformed fields fall back to the built-in palette.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub hover: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseColor {
    pub rgb: Vec3,
    pub hsl: Hsl,
}

impl BaseColor {
    fn resolve(field: &str, value: Option<&str>, default_hex: &str) -> Self {
        let rgb = match value.map(parse_hex) {
            Some(Ok(rgb)) => rgb,
            Some(Err(err)) => {
                log::warn!("[theme] {field} color rejected ({err}); using {default_hex}");
                parse_hex(default_hex).unwrap_or(Vec3::splat(0.5))
            }
            None => parse_hex(default_hex).unwrap_or(Vec3::splat(0.5)),
        };
        Self {
            rgb,
            hsl: Hsl::from_rgb(rgb),
        }
    }
}

/// Resolved colors: one base per shape kind plus the hover color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub shapes: [BaseColor; ShapeKind::COUNT],
    pub hover: BaseColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&ThemeColors::default())
    }
}

impl Palette {
    pub fn from_theme(theme: &ThemeColors) -> Self {
        Self {
            shapes: [
                BaseColor::resolve("primary", theme.primary.as_deref(), DEFAULT_PRIMARY_HEX),
                BaseColor::resolve("secondary", theme.secondary.as_deref(), DEFAULT_SECONDARY_HEX),
                BaseColor::resolve("accent", theme.accent.as_deref(), DEFAULT_ACCENT_HEX),
            ],
            hover: BaseColor::resolve("hover", theme.hover.as_deref(), DEFAULT_HOVER_HEX),
        }
    }

    #[inline]
    pub fn base(&self, kind: ShapeKind) -> &BaseColor {
        &self.shapes[kind.index()]
    }
}

/// Material parameters handed to the renderer for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MaterialColor {
    pub main: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

/// Derive main and emissive color for an entity.
///
/// With zero energy and no hover the kind's base color comes back
/// unmodified and `time` has no influence.
pub fn derive_color(palette: &Palette, time: f32, energy: f32, kind: ShapeKind, hovered: bool) -> MaterialColor {
    let base = palette.base(kind);
    let energy = if energy.is_finite() { energy.clamp(0.0, 1.0) } else { 0.0 };
    if energy <= 0.0 && !hovered {
        return MaterialColor {
            main: base.rgb,
            emissive: base.rgb * 0.2,
            emissive_intensity: 0.0,
        };
    }

    let hsl = if hovered {
        let hover = palette.hover.hsl;
        Hsl::new(hover.h, hover.s + energy * 0.2, hover.l + energy * 0.1)
    } else {
        let time_shift = (time * 0.05).rem_euclid(1.0);
        let hue_shift = energy * 0.2 * (time * 2.0).sin();
        Hsl::new(
            (base.hsl.h + hue_shift + energy * time_shift * 0.3).rem_euclid(1.0),
            lerp(base.hsl.s, EXCITED_SATURATION, energy * 0.7),
            lerp(base.hsl.l, EXCITED_LIGHTNESS, energy * 0.5),
        )
    };

    let emissive = Hsl::new(
        (hsl.h + EMISSIVE_HUE_OFFSET).rem_euclid(1.0),
        (hsl.s + 0.1).min(1.0),
        (hsl.l + 0.2).min(0.8),
    );
    MaterialColor {
        main: hsl.to_rgb(),
        emissive: emissive.to_rgb(),
        emissive_intensity: (energy * 1.2).min(1.0) * EMISSIVE_MAX_INTENSITY,
    }
}

/// Cycling palette used while the easter egg is active.
pub fn rainbow(time: f32, index: usize) -> MaterialColor {
    let hue = (time * 0.2 + index as f32 * 0.01).rem_euclid(1.0);
    MaterialColor {
        main: Hsl::new(hue, 0.8, 0.5).to_rgb(),
        emissive: Hsl::new(hue, 0.9, 0.3).to_rgb(),
        emissive_intensity: 0.5,
    }
}

/// Hue derived from the angle of recent pointer movement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDirection {
    pub hue: f32,
    pub intensity: f32,
    prev: Option<Vec3>,
}

impl PointerDirection {
    pub fn update(&mut self, world: Vec3) {
        let Some(prev) = self.prev else {
            self.prev = Some(world);
            return;
        };
        let delta = world - prev;
        let dist_sq = delta.x * delta.x + delta.y * delta.y;
        if dist_sq > 0.001 {
            self.hue = (delta.y.atan2(delta.x) / TAU + 0.5).rem_euclid(1.0);
            self.intensity = (dist_sq.sqrt() * 3.0).min(1.0);
            self.prev = Some(world);
        } else {
            self.intensity = (self.intensity - DIRECTION_DECAY).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Blend the movement hue into `color` in proportion to movement intensity
/// and entity energy.
pub fn blend_direction(color: MaterialColor, direction: &PointerDirection, energy: f32) -> MaterialColor {
    if direction.intensity <= DIRECTION_MIN_INTENSITY || energy <= 0.0 {
        return color;
    }
    let k = (direction.intensity * energy * 0.7).clamp(0.0, 1.0);
    let main_target = Hsl::new(direction.hue, 0.8, 0.5 + energy * 0.2).to_rgb();
    let emissive_target = Hsl::new(direction.hue + EMISSIVE_HUE_OFFSET, 0.9, 0.4).to_rgb();
    MaterialColor {
        main: color.main.lerp(main_target, k),
        emissive: color.emissive.lerp(emissive_target, k),
        emissive_intensity: color.emissive_intensity + direction.intensity * 0.3 * energy,
    }
}
