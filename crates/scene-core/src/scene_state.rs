//! Active-scene state machine with transition, burst and idle timers.
//!
//! Every timer is a countdown stored here and advanced by [`SceneState::tick`];
//! nothing fires outside a tick, so dropping the state cancels everything.

use crate::config::SceneConfig;
use crate::entity::ShapeKind;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Steady,
    Transitioning { remaining: f32 },
}

/// Notifications for the outer UI, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    SceneChanged { kind: ShapeKind, label: &'static str },
    EasterEggStarted,
    EasterEggEnded,
}

pub type SceneEvents = SmallVec<[SceneEvent; 4]>;

#[derive(Clone, Copy, Debug)]
struct Timing {
    transition: f32,
    burst_window: f32,
    egg_threshold: u32,
    egg_duration: f32,
    interaction_timeout: f32,
    auto_advance: Option<f32>,
}

pub struct SceneState {
    active: ShapeKind,
    phase: Phase,
    timing: Timing,
    clock: f32,
    easter_egg_remaining: Option<f32>,
    interaction_count: u32,
    last_interaction: Option<f32>,
    interaction_remaining: f32,
    auto_advance_remaining: Option<f32>,
    is_dragging: bool,
    interaction_enabled: bool,
    events: SceneEvents,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        let timing = Timing {
            transition: config.transition_duration,
            burst_window: config.burst_window,
            egg_threshold: config.easter_egg_threshold.max(1),
            egg_duration: config.easter_egg_duration,
            interaction_timeout: config.pointer_idle_timeout,
            auto_advance: config.auto_advance.filter(|s| s.is_finite() && *s > 0.0),
        };
        Self {
            active: config.initial_kind,
            phase: Phase::Steady,
            timing,
            clock: 0.0,
            easter_egg_remaining: None,
            interaction_count: 0,
            last_interaction: None,
            interaction_remaining: 0.0,
            auto_advance_remaining: timing.auto_advance,
            is_dragging: false,
            interaction_enabled: true,
            events: SceneEvents::new(),
        }
    }

    /// Switch to the next scene variant in response to a user action.
    ///
    /// Ignored entirely while interaction is disabled. Otherwise it counts
    /// toward the interaction burst, and switches unless a transition is
    /// running. Returns whether the active kind changed.
    pub fn advance_scene(&mut self) -> bool {
        if !self.interaction_enabled {
            log::debug!("[scene] advance ignored: interaction disabled");
            return false;
        }
        self.register_interaction();
        if self.is_transitioning() {
            log::debug!("[scene] advance ignored: transition in progress");
            return false;
        }
        self.switch_to_next();
        true
    }

    fn switch_to_next(&mut self) {
        self.active = self.active.next();
        self.phase = Phase::Transitioning {
            remaining: self.timing.transition,
        };
        self.auto_advance_remaining = self.timing.auto_advance;
        log::info!("[scene] switched to {}", self.active.label());
        self.events.push(SceneEvent::SceneChanged {
            kind: self.active,
            label: self.active.label(),
        });
    }

    fn register_interaction(&mut self) {
        let within_burst = self
            .last_interaction
            .is_some_and(|last| self.clock - last < self.timing.burst_window);
        self.interaction_count = if within_burst {
            self.interaction_count.saturating_add(1)
        } else {
            1
        };
        self.last_interaction = Some(self.clock);
        self.note_pointer_activity();

        if self.interaction_count >= self.timing.egg_threshold && self.easter_egg_remaining.is_none() {
            self.easter_egg_remaining = Some(self.timing.egg_duration);
            self.interaction_count = 0;
            log::info!("[scene] easter egg on");
            self.events.push(SceneEvent::EasterEggStarted);
        }
    }

    /// Mark recent pointer interaction; also restarts the auto-advance timer.
    pub fn note_pointer_activity(&mut self) {
        self.interaction_remaining = self.timing.interaction_timeout;
        self.auto_advance_remaining = self.timing.auto_advance;
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;

        if let Phase::Transitioning { remaining } = self.phase {
            let remaining = remaining - dt;
            self.phase = if remaining <= 0.0 {
                Phase::Steady
            } else {
                Phase::Transitioning { remaining }
            };
        }

        if let Some(remaining) = self.easter_egg_remaining {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.easter_egg_remaining = None;
                log::info!("[scene] easter egg off");
                self.events.push(SceneEvent::EasterEggEnded);
            } else {
                self.easter_egg_remaining = Some(remaining);
            }
        }

        self.interaction_remaining = (self.interaction_remaining - dt).max(0.0);

        if let Some(remaining) = self.auto_advance_remaining {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.auto_advance_remaining = Some(remaining);
            } else if !self.is_transitioning() && self.interaction_enabled {
                self.switch_to_next();
            } else {
                self.auto_advance_remaining = Some(0.0);
            }
        }
    }

    /// Stop every pending timer and forget queued notifications.
    pub fn cancel_timers(&mut self) {
        self.phase = Phase::Steady;
        self.easter_egg_remaining = None;
        self.auto_advance_remaining = None;
        self.interaction_remaining = 0.0;
        self.interaction_count = 0;
        self.last_interaction = None;
        self.events.clear();
    }

    pub fn drain_events(&mut self) -> SceneEvents {
        std::mem::take(&mut self.events)
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
        if dragging {
            self.note_pointer_activity();
        }
    }

    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_enabled = enabled;
        if !enabled {
            self.is_dragging = false;
        }
    }

    #[inline]
    pub fn active_kind(&self) -> ShapeKind {
        self.active
    }
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }
    #[inline]
    pub fn easter_egg_active(&self) -> bool {
        self.easter_egg_remaining.is_some()
    }
    #[inline]
    pub fn has_interaction(&self) -> bool {
        self.interaction_remaining > 0.0
    }
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
    #[inline]
    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }
    #[inline]
    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }
    /// Seconds since this state was created, advanced only by `tick`.
    #[inline]
    pub fn clock(&self) -> f32 {
        self.clock
    }
}
