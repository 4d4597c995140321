// Host-side tests for theme parsing and material color derivation.

use glam::Vec3;
use scene_core::{
    blend_direction, derive_color, parse_hex, rainbow, Hsl, MaterialColor, Palette,
    PointerDirection, ShapeKind, ThemeColors, ThemeError, DEFAULT_PRIMARY_HEX,
    DEFAULT_SECONDARY_HEX, EMISSIVE_MAX_INTENSITY,
};

fn close(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}

#[test]
fn parses_long_and_short_hex() {
    let c = parse_hex("#5363EE").unwrap();
    assert!(close(c, Vec3::new(83.0, 99.0, 238.0) / 255.0, 1e-6));
    let short = parse_hex("fa0").unwrap();
    assert!(close(short, Vec3::new(1.0, 170.0 / 255.0, 0.0), 1e-6));
}

#[test]
fn rejects_malformed_hex() {
    assert_eq!(parse_hex(""), Err(ThemeError::Empty));
    assert_eq!(parse_hex("#"), Err(ThemeError::Empty));
    assert_eq!(parse_hex("#12345"), Err(ThemeError::InvalidLength(5)));
    assert!(matches!(parse_hex("#12G456"), Err(ThemeError::InvalidDigit(_))));
    assert!(matches!(parse_hex("+12"), Err(ThemeError::InvalidDigit(_))));
}

#[test]
fn hsl_conversion_matches_known_colors() {
    let red = Hsl::from_rgb(Vec3::new(1.0, 0.0, 0.0));
    assert!(red.h.abs() < 1e-6 && (red.s - 1.0).abs() < 1e-6 && (red.l - 0.5).abs() < 1e-6);
    let grey = Hsl::from_rgb(Vec3::splat(0.25));
    assert_eq!(grey.s, 0.0);
    assert!(close(grey.to_rgb(), Vec3::splat(0.25), 1e-6));
    let primary = parse_hex(DEFAULT_PRIMARY_HEX).unwrap();
    assert!(close(Hsl::from_rgb(primary).to_rgb(), primary, 1e-5));
}

#[test]
fn zero_energy_returns_exact_base_color_at_any_time() {
    let palette = Palette::default();
    for kind in ShapeKind::ALL {
        let base = palette.base(kind).rgb;
        for time in [0.0, 1.3, 17.0, 999.5] {
            let c = derive_color(&palette, time, 0.0, kind, false);
            assert_eq!(c.main, base, "{kind:?} at t={time}");
            assert_eq!(c.emissive_intensity, 0.0);
        }
    }
    assert_eq!(palette.base(ShapeKind::Box).rgb, parse_hex(DEFAULT_SECONDARY_HEX).unwrap());
}

#[test]
fn energy_shifts_color_and_raises_glow() {
    let palette = Palette::default();
    let calm = derive_color(&palette, 2.0, 0.0, ShapeKind::Sphere, false);
    let hot = derive_color(&palette, 2.0, 1.0, ShapeKind::Sphere, false);
    assert_ne!(calm.main, hot.main);
    assert!((hot.emissive_intensity - EMISSIVE_MAX_INTENSITY).abs() < 1e-6);
    let warm = derive_color(&palette, 2.0, 0.5, ShapeKind::Sphere, false);
    assert!(warm.emissive_intensity > 0.0 && warm.emissive_intensity < hot.emissive_intensity);
}

#[test]
fn energetic_colors_drift_with_time() {
    let palette = Palette::default();
    let a = derive_color(&palette, 0.0, 0.8, ShapeKind::Ring, false);
    let b = derive_color(&palette, 0.7, 0.8, ShapeKind::Ring, false);
    assert_ne!(a.main, b.main);
}

#[test]
fn hovered_entities_take_the_hover_hue() {
    let palette = Palette::default();
    let hovered = derive_color(&palette, 3.0, 0.0, ShapeKind::Sphere, true);
    assert!(close(hovered.main, palette.hover.rgb, 1e-4));
    let hover_hue = Hsl::from_rgb(hovered.main).h;
    assert!((hover_hue - palette.hover.hsl.h).abs() < 1e-3);
}

#[test]
fn malformed_theme_fields_fall_back_to_defaults() {
    let theme = ThemeColors {
        primary: Some("not-a-color".into()),
        secondary: Some("#123".into()),
        accent: None,
        hover: Some(String::new()),
    };
    let palette = Palette::from_theme(&theme);
    let defaults = Palette::default();
    assert_eq!(palette.base(ShapeKind::Sphere), defaults.base(ShapeKind::Sphere));
    assert_eq!(palette.base(ShapeKind::Ring), defaults.base(ShapeKind::Ring));
    assert_eq!(palette.hover, defaults.hover);
    assert!(close(palette.base(ShapeKind::Box).rgb, glam::IVec3::new(0x11, 0x22, 0x33).as_vec3() / 255.0, 1e-6));
}

#[test]
fn rainbow_cycles_hue() {
    let a = rainbow(0.0, 0);
    let b = rainbow(2.5, 0);
    let c = rainbow(5.0, 0);
    assert_ne!(a.main, b.main);
    assert!(close(a.main, c.main, 1e-5), "hue wraps every 5 seconds");
    assert_eq!(a.emissive_intensity, 0.5);
}

#[test]
fn pointer_direction_maps_angle_to_hue_and_decays() {
    let mut dir = PointerDirection::default();
    dir.update(Vec3::ZERO);
    dir.update(Vec3::new(1.0, 0.0, 0.0));
    assert!((dir.hue - 0.5).abs() < 1e-6);
    assert!((dir.intensity - 1.0).abs() < 1e-6);
    dir.update(Vec3::new(1.0, 1.0, 0.0));
    assert!((dir.hue - 0.75).abs() < 1e-6);
    let before = dir.intensity;
    dir.update(Vec3::new(1.0, 1.0, 0.0));
    assert!(dir.intensity < before);
    for _ in 0..100 {
        dir.update(Vec3::new(1.0, 1.0, 0.0));
    }
    assert_eq!(dir.intensity, 0.0);
}

#[test]
fn direction_blend_only_applies_to_strong_movement() {
    let base = MaterialColor {
        main: Vec3::new(0.2, 0.3, 0.4),
        emissive: Vec3::splat(0.1),
        emissive_intensity: 0.2,
    };
    let still = PointerDirection::default();
    assert_eq!(blend_direction(base, &still, 1.0), base);

    let mut moving = PointerDirection::default();
    moving.update(Vec3::ZERO);
    moving.update(Vec3::new(0.0, 2.0, 0.0));
    let blended = blend_direction(base, &moving, 1.0);
    assert_ne!(blended.main, base.main);
    assert!(blended.emissive_intensity > base.emissive_intensity);
    assert_eq!(blend_direction(base, &moving, 0.0), base);
}
