// Host-side tests for the scene state machine and its timers.

use scene_core::{Phase, SceneConfig, SceneEvent, SceneState, ShapeKind, TRANSITION_DURATION_SEC};

const DT: f32 = 1.0 / 60.0;

fn run(state: &mut SceneState, seconds: f32) {
    let frames = (seconds / DT).ceil() as usize;
    for _ in 0..frames {
        state.tick(DT);
    }
}

#[test]
fn advance_cycles_through_every_variant() {
    let mut state = SceneState::new(&SceneConfig::default());
    assert_eq!(state.active_kind(), ShapeKind::Sphere);
    let mut seen = vec![state.active_kind()];
    for _ in 0..3 {
        assert!(state.advance_scene());
        seen.push(state.active_kind());
        run(&mut state, 1.5);
    }
    assert_eq!(
        seen,
        vec![ShapeKind::Sphere, ShapeKind::Box, ShapeKind::Ring, ShapeKind::Sphere]
    );
}

#[test]
fn advance_during_transition_is_ignored() {
    let mut state = SceneState::new(&SceneConfig::default());
    assert!(state.advance_scene());
    assert!(state.is_transitioning());
    let kind = state.active_kind();
    state.tick(0.1);
    assert!(!state.advance_scene());
    assert_eq!(state.active_kind(), kind);
    let changes = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SceneEvent::SceneChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn transition_expires_on_its_own() {
    let mut state = SceneState::new(&SceneConfig::default());
    state.advance_scene();
    run(&mut state, TRANSITION_DURATION_SEC - 0.1);
    assert!(state.is_transitioning());
    run(&mut state, 0.2);
    assert_eq!(state.phase(), Phase::Steady);
    assert!(state.advance_scene());
}

#[test]
fn scene_change_event_carries_label() {
    let mut state = SceneState::new(&SceneConfig::default());
    state.advance_scene();
    let events = state.drain_events();
    assert_eq!(
        events.as_slice(),
        &[SceneEvent::SceneChanged {
            kind: ShapeKind::Box,
            label: "Boxes"
        }]
    );
    assert!(state.drain_events().is_empty());
}

#[test]
fn five_quick_interactions_start_the_easter_egg_which_then_expires() {
    let mut state = SceneState::new(&SceneConfig::default());
    for _ in 0..5 {
        state.advance_scene();
        state.tick(0.15);
    }
    assert!(state.easter_egg_active());
    let events = state.drain_events();
    assert!(events.contains(&SceneEvent::EasterEggStarted));

    run(&mut state, 4.5);
    assert!(state.easter_egg_active());
    run(&mut state, 0.6);
    assert!(!state.easter_egg_active());
    assert!(state.drain_events().contains(&SceneEvent::EasterEggEnded));
}

#[test]
fn slow_interactions_never_start_the_easter_egg() {
    let mut state = SceneState::new(&SceneConfig::default());
    for _ in 0..8 {
        state.advance_scene();
        run(&mut state, 1.1);
    }
    assert!(!state.easter_egg_active());
    assert_eq!(state.interaction_count(), 1);
}

#[test]
fn burst_count_resets_after_a_pause() {
    let mut state = SceneState::new(&SceneConfig::default());
    for _ in 0..4 {
        state.advance_scene();
        state.tick(0.1);
    }
    assert_eq!(state.interaction_count(), 4);
    run(&mut state, 1.2);
    state.advance_scene();
    assert_eq!(state.interaction_count(), 1);
    assert!(!state.easter_egg_active());
}

#[test]
fn disabled_interaction_blocks_advances() {
    let mut state = SceneState::new(&SceneConfig::default());
    state.set_interaction_enabled(false);
    assert!(!state.advance_scene());
    assert_eq!(state.active_kind(), ShapeKind::Sphere);
    assert_eq!(state.interaction_count(), 0);
    state.set_interaction_enabled(true);
    assert!(state.advance_scene());
}

#[test]
fn pointer_activity_flag_times_out() {
    let mut state = SceneState::new(&SceneConfig::default());
    assert!(!state.has_interaction());
    state.note_pointer_activity();
    assert!(state.has_interaction());
    run(&mut state, 2.1);
    assert!(!state.has_interaction());
}

#[test]
fn auto_advance_switches_after_idle_interval() {
    let config = SceneConfig {
        auto_advance: Some(3.0),
        ..SceneConfig::default()
    };
    let mut state = SceneState::new(&config);
    run(&mut state, 2.9);
    assert_eq!(state.active_kind(), ShapeKind::Sphere);
    run(&mut state, 0.2);
    assert_eq!(state.active_kind(), ShapeKind::Box);
    assert!(state.is_transitioning());

    // Pointer activity postpones the next switch.
    run(&mut state, 2.5);
    state.note_pointer_activity();
    run(&mut state, 2.5);
    assert_eq!(state.active_kind(), ShapeKind::Box);
}

#[test]
fn cancel_timers_clears_everything_pending() {
    let mut state = SceneState::new(&SceneConfig::default());
    for _ in 0..5 {
        state.advance_scene();
    }
    assert!(state.easter_egg_active());
    state.cancel_timers();
    assert!(!state.is_transitioning());
    assert!(!state.easter_egg_active());
    assert!(state.drain_events().is_empty());
    run(&mut state, 10.0);
    assert!(state.drain_events().is_empty());
}

#[test]
fn non_finite_dt_is_ignored() {
    let mut state = SceneState::new(&SceneConfig::default());
    state.advance_scene();
    state.tick(f32::NAN);
    state.tick(-1.0);
    assert!(state.is_transitioning());
    assert_eq!(state.clock(), 0.0);
}
