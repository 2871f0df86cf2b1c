//! Transition animator — eases panels between visual states.
//!
//! This is the rendering side of the machine's `AnimationDriver` seam: the
//! stack hands over per-panel targets, and each tick the animator pushes an
//! interpolated [`VisualState`] through every [`PanelHandle`].  Transitions
//! run a fixed duration with an ease-out curve, so a swipe lands fast and
//! settles soft.

use std::time::{Duration, Instant};

use crate::core::{AnimationDriver, PanelHandle, VisualState};

// ───────────────────────────────────────── easing ────────────

/// Easing curve applied over normalized transition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    OutQuad,
    OutCubic,
}

impl Ease {
    /// Ordered list of all curves (used for the settings cycle).
    pub const ALL: &[Ease] = &[Ease::OutCubic, Ease::OutQuad, Ease::Linear];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::OutQuad => "out-quad",
            Self::OutCubic => "out-cubic",
        }
    }

    /// Key used in the config file.
    pub fn config_key(self) -> &'static str {
        self.label()
    }

    pub fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Self::Linear),
            "out-quad" => Some(Self::OutQuad),
            "out-cubic" => Some(Self::OutCubic),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── animator ──────────

/// One in-flight interpolation.
#[derive(Debug, Clone, Copy)]
struct Transition {
    from: VisualState,
    to: VisualState,
    started: Instant,
}

/// Fixed-duration, ease-out interpolator over panel visual states.
#[derive(Debug)]
pub struct TransitionAnimator {
    duration: Duration,
    ease: Ease,
    /// Current (possibly mid-flight) presentation per panel.
    current: Vec<VisualState>,
    transitions: Vec<Option<Transition>>,
}

impl TransitionAnimator {
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            current: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_ease(&mut self, ease: Ease) {
        self.ease = ease;
    }

    /// Set a panel's presentation instantly, cancelling any transition.
    /// Used at startup and after a resize, when animating would be noise.
    pub fn snap(&mut self, panel: usize, visual: VisualState) {
        if panel < self.current.len() {
            self.current[panel] = visual;
            self.transitions[panel] = None;
        }
    }

    /// Current presentation for `panel` (mid-flight values included).
    pub fn current(&self, panel: usize) -> Option<VisualState> {
        self.current.get(panel).copied()
    }

    /// True while any transition is still interpolating.
    pub fn animating(&self) -> bool {
        self.transitions.iter().any(Option::is_some)
    }

    /// Advance all in-flight transitions to `now` and push the resulting
    /// states through the handles.  Returns `true` while motion remains.
    pub fn tick(&mut self, now: Instant, handles: &mut [impl PanelHandle]) -> bool {
        for (panel, slot) in self.transitions.iter_mut().enumerate() {
            let Some(tr) = slot else { continue };
            let elapsed = now.saturating_duration_since(tr.started);
            let t = if self.duration.is_zero() {
                1.0
            } else {
                elapsed.as_secs_f64() / self.duration.as_secs_f64()
            };
            if t >= 1.0 {
                self.current[panel] = tr.to;
                *slot = None;
            } else {
                self.current[panel] = lerp(tr.from, tr.to, self.ease.apply(t));
            }
        }
        for (panel, handle) in handles.iter_mut().enumerate() {
            if let Some(visual) = self.current.get(panel) {
                handle.apply_transform(*visual);
            }
        }
        self.animating()
    }
}

impl AnimationDriver for TransitionAnimator {
    fn init(&mut self, total: usize) {
        self.current = vec![VisualState::foreground(0); total];
        self.transitions = vec![None; total];
    }

    fn teardown(&mut self) {
        self.current.clear();
        self.transitions.clear();
    }

    fn animate(&mut self, panel: usize, target: VisualState, now: Instant) {
        let Some(&from) = self.current.get(panel) else {
            tracing::warn!(panel, "animate before init, dropped");
            return;
        };
        if from == target {
            self.transitions[panel] = None;
            return;
        }
        self.transitions[panel] = Some(Transition {
            from,
            to: target,
            started: now,
        });
    }
}

/// Field-wise interpolation.  `z_index` snaps to the target immediately so
/// the incoming card overdraws the outgoing one for the whole transition.
fn lerp(from: VisualState, to: VisualState, t: f64) -> VisualState {
    let mix = |a: f64, b: f64| a + (b - a) * t;
    VisualState {
        scale: mix(from.scale, to.scale),
        translate_y: mix(from.translate_y, to.translate_y),
        opacity: mix(from.opacity, to.opacity),
        z_index: to.z_index,
        rotation: mix(from.rotation, to.rotation),
    }
}
