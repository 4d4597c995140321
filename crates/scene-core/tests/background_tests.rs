// Host-side tests for the mounted background orchestrator.

use scene_core::{
    Background, SceneConfig, SceneEvent, ShapeKind, ThemeColors, Viewport, FRAME_DT,
    INSTANCE_FLOATS,
};

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn run(bg: &mut Background, frames: usize) {
    for _ in 0..frames {
        bg.tick(FRAME_DT);
    }
}

#[test]
fn desktop_and_compact_profiles_size_the_scene() {
    let mut desktop = Background::new(SceneConfig::default(), viewport());
    desktop.tick(FRAME_DT);
    assert_eq!(desktop.instances().len(), 50);

    let mut compact = Background::new(SceneConfig::compact(), viewport());
    compact.tick(FRAME_DT);
    assert_eq!(compact.instances().len(), 25);
    assert_eq!(compact.config().grid_cells(), 25);
}

#[test]
fn instance_floats_are_a_flat_view_of_instances() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    bg.tick(FRAME_DT);
    let floats = bg.instance_floats();
    assert_eq!(INSTANCE_FLOATS, 17);
    assert_eq!(floats.len(), bg.instances().len() * INSTANCE_FLOATS);
    let first = &bg.instances()[0];
    assert_eq!(&floats[0..3], &first.position);
    assert_eq!(floats[9], ShapeKind::Sphere.index() as f32);
}

#[test]
fn advancing_remounts_the_next_variant_and_reports_it() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    run(&mut bg, 10);
    assert!(bg.advance_scene());
    assert_eq!(bg.mounted_kind(), Some(ShapeKind::Box));
    run(&mut bg, 1);
    assert_eq!(bg.instances().len(), 64);
    assert!(bg.instances().iter().all(|i| i.kind == ShapeKind::Box.index() as f32));
    let events = bg.drain_events();
    assert!(events.contains(&SceneEvent::SceneChanged {
        kind: ShapeKind::Box,
        label: "Boxes"
    }));
    assert_eq!(bg.pool().in_use_len(), 64);
}

#[test]
fn clicks_during_transition_do_not_switch_twice() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    assert!(bg.advance_scene());
    run(&mut bg, 5);
    assert!(!bg.advance_scene());
    assert_eq!(bg.active_kind(), ShapeKind::Box);
}

#[test]
fn rapid_clicks_trigger_easter_egg_colors() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    for _ in 0..5 {
        bg.advance_scene();
        run(&mut bg, 6);
    }
    assert!(bg.scene().easter_egg_active());
    run(&mut bg, 1);
    // Rainbow palette uses a fixed glow.
    assert!(bg.instances().iter().all(|i| i.emissive_intensity == 0.5));
    run(&mut bg, 60 * 6);
    assert!(!bg.scene().easter_egg_active());
}

#[test]
fn theme_change_recolors_idle_entities() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    bg.tick(FRAME_DT);
    let theme = ThemeColors {
        primary: Some("#ff0000".into()),
        ..ThemeColors::default()
    };
    bg.set_theme(&theme);
    bg.tick(FRAME_DT);
    let calm = bg
        .instances()
        .iter()
        .find(|i| i.emissive_intensity == 0.0)
        .expect("untouched spheres stay on the cheap path");
    assert_eq!(calm.color, [1.0, 0.0, 0.0]);
}

#[test]
fn unmount_releases_everything_and_stops_ticking() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    bg.pointer_move(600.0, 300.0);
    for _ in 0..5 {
        bg.advance_scene();
    }
    run(&mut bg, 10);
    bg.unmount();
    assert!(bg.is_disposed());
    assert_eq!(bg.pool().in_use_len(), 0);
    assert!(bg.pool().is_consistent());
    assert!(bg.instances().is_empty());
    assert!(!bg.scene().easter_egg_active());

    run(&mut bg, 600);
    assert!(bg.instances().is_empty());
    assert!(bg.drain_events().is_empty());
    assert!(!bg.advance_scene());
    assert_eq!(bg.pool().in_use_len(), 0);
}

#[test]
fn bad_frame_times_are_tolerated() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    bg.tick(f32::NAN);
    bg.tick(f32::INFINITY);
    bg.tick(-3.0);
    bg.tick(10.0);
    assert!(bg.time() <= 0.25 + 1e-6);
    assert!(bg.instances().iter().all(|i| i.position.iter().all(|v| v.is_finite())));
}

#[test]
fn disabled_interaction_keeps_the_scene_idle() {
    let mut bg = Background::new(SceneConfig::default(), viewport());
    bg.set_interaction_enabled(false);
    bg.pointer_move(640.0, 360.0);
    run(&mut bg, 120);
    assert!(bg.entities().all(|e| e.excitement == 0.0));
    assert!(!bg.advance_scene());
}

#[test]
fn same_seed_gives_same_frames() {
    let mut a = Background::new(SceneConfig::default().with_seed(99), viewport());
    let mut b = Background::new(SceneConfig::default().with_seed(99), viewport());
    for frame in 0..120 {
        let x = 200.0 + frame as f32 * 5.0;
        a.pointer_move(x, 300.0);
        b.pointer_move(x, 300.0);
        a.tick(FRAME_DT);
        b.tick(FRAME_DT);
    }
    assert_eq!(a.instances(), b.instances());
}

#[test]
fn auto_advance_cycles_scenes_when_idle() {
    let config = SceneConfig {
        auto_advance: Some(1.0),
        ..SceneConfig::default()
    };
    let mut bg = Background::new(config, viewport());
    run(&mut bg, 70);
    assert_eq!(bg.mounted_kind(), Some(ShapeKind::Box));
    assert!(matches!(
        bg.drain_events().as_slice(),
        [SceneEvent::SceneChanged {
            kind: ShapeKind::Box,
            ..
        }]
    ));
}

#[test]
fn untouched_scenes_never_gain_excitement() {
    for kind in [ShapeKind::Box, ShapeKind::Ring] {
        let config = SceneConfig {
            initial_kind: kind,
            ..SceneConfig::default()
        };
        let mut bg = Background::new(config.with_seed(7), viewport());
        bg.tick(FRAME_DT);
        let mut previous: Vec<f32> = bg.entities().map(|e| e.excitement).collect();
        // Crosses the idle ripple windows at 10 s and 20 s.
        for frame in 0..1300 {
            bg.tick(FRAME_DT);
            let current: Vec<f32> = bg.entities().map(|e| e.excitement).collect();
            if current.len() == previous.len() {
                for (before, after) in previous.iter().zip(&current) {
                    assert!(after <= before, "{kind:?} frame {frame}: excitement rose from {before} to {after}");
                }
            }
            previous = current;
        }
        assert!(previous.iter().all(|e| *e == 0.0), "{kind:?}");
    }
}

#[test]
fn full_ring_trail_fits_the_presized_pool() {
    let config = SceneConfig {
        initial_kind: ShapeKind::Ring,
        sphere_count: 4,
        grid_side: 2,
        trail_capacity: 12,
        ..SceneConfig::default()
    };
    assert_eq!(config.max_entities(), 13);
    let mut bg = Background::new(config, viewport());
    for i in 0..90 {
        bg.pointer_move(100.0 + (i % 30) as f32 * 30.0, 360.0);
        bg.tick(FRAME_DT);
    }
    assert_eq!(bg.entities().count(), 12);
    assert_eq!(bg.pool().capacity(), 13);
    assert!(bg.pool().is_consistent());
}
