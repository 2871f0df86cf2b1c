//! Gesture classification — continuous scroll deltas in, discrete intents out.
//!
//! Wheel and trackpad input arrives as a stream of signed deltas.  While the
//! deck owns the page, each delta is either noise (inside the tolerance),
//! suppressed (cooldown window still open), or classified into exactly one
//! [`Intent`].  The cooldown is what keeps a momentum burst from skipping
//! several panels in one flick.

use std::time::{Duration, Instant};

/// A classified scroll gesture, reduced to its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
}

/// Classifies raw scroll deltas into discrete [`Intent`]s.
///
/// All timing is explicit: callers pass the current [`Instant`], so there are
/// no internal timers to cancel — `disable()` simply clears the pending
/// cooldown and the observer is inert until the next `enable()`.
#[derive(Debug)]
pub struct IntentObserver {
    /// Deltas with magnitude at or below this are ignored as noise.
    tolerance: f64,
    /// Minimum spacing between accepted gestures.
    cooldown: Duration,
    enabled: bool,
    /// End of the current cooldown window.  `None` when unlocked.
    locked_until: Option<Instant>,
}

impl IntentObserver {
    pub fn new(tolerance: f64, cooldown: Duration) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            cooldown,
            enabled: false,
            locked_until: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the cooldown window is still open at `now`.
    pub fn locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Begin intercepting gestures.
    ///
    /// Arms the cooldown immediately: the gesture that triggered the pin is
    /// still in flight and must not also fire a panel transition.  Re-enabling
    /// while already enabled only restarts the window.
    pub fn enable(&mut self, now: Instant) {
        self.enabled = true;
        self.locked_until = Some(now + self.cooldown);
    }

    /// Stop intercepting.  Idempotent — the pending cooldown is cancelled
    /// atomically with the flag, so a late tick can never fire a transition
    /// after the deck has been scrolled away.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.locked_until = None;
    }

    /// Classify a raw delta.
    ///
    /// Returns `None` while disabled or locked, and for deltas inside the
    /// noise tolerance.  A successful classification restarts the cooldown.
    pub fn classify(&mut self, delta: f64, now: Instant) -> Option<Intent> {
        if !self.enabled {
            return None;
        }
        if self.locked(now) {
            tracing::trace!(delta, "gesture suppressed by cooldown");
            return None;
        }

        let intent = if delta > self.tolerance {
            Intent::Down
        } else if delta < -self.tolerance {
            Intent::Up
        } else {
            tracing::trace!(delta, "gesture below tolerance, ignored");
            return None;
        };

        self.locked_until = Some(now + self.cooldown);
        Some(intent)
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.max(0.0);
    }

    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.cooldown = cooldown;
    }
}
