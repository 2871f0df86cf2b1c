//! The swipe machine — observer, guard, pin controller, and stack wired over
//! a host scroll surface.
//!
//! Event flow: native scroll events either get counteracted (pinned) or
//! checked against the section boundary (unpinned); gesture deltas are
//! classified and applied to the stack, which either animates a transition or
//! releases the pin at the deck's ends.  The caller supplies the clock — the
//! machine sets no timers, so teardown can never race a pending one.

use std::time::{Duration, Instant};

use crate::core::error::MachineError;
use crate::core::freeze::{FreezeGuard, ScrollSurface};
use crate::core::intent::{Intent, IntentObserver};
use crate::core::pin::PinController;
use crate::core::stack::{AnimationDriver, PanelStack, StepOutcome, VisualState};

/// How far past the boundary the offset is handed back on release, so native
/// scrolling resumes without immediately re-pinning.
const RELEASE_NUDGE: f64 = 1.0;

/// Scroll-intent → panel state machine for one pinned deck section.
#[derive(Debug)]
pub struct SwipeMachine {
    observer: IntentObserver,
    guard: FreezeGuard,
    pin: PinController,
    stack: PanelStack,
    /// Page offset at which the deck's leading edge meets the viewport top.
    section_top: f64,
    /// Offset seen after the previous scroll event, for crossing detection.
    prev_offset: f64,
}

impl SwipeMachine {
    /// Build a machine for a deck of `total` panels pinned at `section_top`.
    ///
    /// Fails fast on a deck that could never navigate (`total == 0`) or
    /// degenerate geometry — a machine without a real section is meaningless.
    pub fn new(
        total: usize,
        section_top: f64,
        tolerance: f64,
        cooldown: Duration,
    ) -> Result<Self, MachineError> {
        if !section_top.is_finite() || section_top < 0.0 {
            return Err(MachineError::InvalidGeometry { top: section_top });
        }
        Ok(Self {
            observer: IntentObserver::new(tolerance, cooldown),
            guard: FreezeGuard::default(),
            pin: PinController::default(),
            stack: PanelStack::new(total)?,
            section_top,
            prev_offset: 0.0,
        })
    }

    pub fn pinned(&self) -> bool {
        self.pin.pinned()
    }

    pub fn enabled(&self) -> bool {
        self.observer.enabled()
    }

    pub fn saved_offset(&self) -> Option<f64> {
        self.guard.saved_offset()
    }

    pub fn active(&self) -> usize {
        self.stack.active()
    }

    pub fn total(&self) -> usize {
        self.stack.total()
    }

    /// Presentation for one panel at the current active index.
    pub fn visual_state(&self, index: usize) -> VisualState {
        self.stack.visual_state(index)
    }

    /// Re-derive geometry after a viewport resize.  While pinned, the saved
    /// offset moves with the section so the freeze guard keeps restoring a
    /// position that still means "flush with the viewport top".
    pub fn set_section_top(&mut self, surface: &mut impl ScrollSurface, section_top: f64) {
        self.section_top = section_top;
        if self.guard.engaged() {
            surface.set_offset(section_top);
            self.guard.engage(surface);
        }
        self.prev_offset = surface.offset();
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.observer.set_tolerance(tolerance);
    }

    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.observer.set_cooldown(cooldown);
    }

    /// Feed one native scroll event.
    ///
    /// While the deck owns the page the guard counteracts the scroll;
    /// otherwise the new offset is checked against the section boundary and
    /// the pin engages when the boundary was crossed this event.
    pub fn on_scroll(&mut self, surface: &mut impl ScrollSurface, now: Instant) {
        if self.observer.enabled() {
            self.guard.on_scroll(surface);
            self.prev_offset = surface.offset();
            return;
        }

        let offset = surface.offset();
        let crossed_down = self.prev_offset < self.section_top && offset >= self.section_top;
        let crossed_up = self.prev_offset > self.section_top && offset <= self.section_top;

        if crossed_down {
            self.engage(surface, now, false);
        } else if crossed_up {
            self.engage(surface, now, true);
        }
        self.prev_offset = surface.offset();
    }

    /// Feed one raw gesture delta (positive = down).
    ///
    /// Ignored entirely while unpinned, locked, or inside the noise
    /// tolerance.  A classified intent either steps the stack (notifying the
    /// driver with every panel's new target) or releases the pin at the
    /// deck's ends.
    pub fn on_gesture(
        &mut self,
        delta: f64,
        surface: &mut impl ScrollSurface,
        driver: &mut impl AnimationDriver,
        now: Instant,
    ) {
        let Some(intent) = self.observer.classify(delta, now) else {
            return;
        };

        match self.stack.apply_intent(intent) {
            StepOutcome::Moved { from, to } => {
                tracing::debug!(from, to, "panel transition");
                for index in 0..self.stack.total() {
                    driver.animate(index, self.stack.visual_state(index), now);
                }
            }
            StepOutcome::OutOfBounds(direction) => {
                self.release(surface, direction);
            }
        }
    }

    /// `Unpinned → Pinned`: nudge the offset flush into the pinned region so
    /// the boundary cannot re-fire, then take ownership and start
    /// intercepting gestures.  No-op while already pinned.
    fn engage(&mut self, surface: &mut impl ScrollSurface, now: Instant, back: bool) {
        let entered = if back {
            self.pin.on_enter_back()
        } else {
            self.pin.on_enter()
        };
        if !entered {
            return;
        }
        surface.set_offset(self.section_top);
        self.guard.engage(surface);
        self.observer.enable(now);
    }

    /// `Pinned → Unpinned`: disable interception, drop the saved offset, and
    /// hand the page back one unit past the boundary in the travel direction.
    fn release(&mut self, surface: &mut impl ScrollSurface, direction: Intent) {
        if !self.pin.release() {
            return;
        }
        self.observer.disable();
        self.guard.release();

        let handoff = match direction {
            Intent::Down => self.section_top + RELEASE_NUDGE,
            Intent::Up => self.section_top - RELEASE_NUDGE,
        };
        surface.set_offset(handoff.clamp(0.0, surface.max_offset()));
        self.prev_offset = surface.offset();
        tracing::debug!(?direction, offset = self.prev_offset, "handed back to native scroll");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSurface {
        offset: f64,
        max: f64,
    }

    impl TestSurface {
        fn new(max: f64) -> Self {
            Self { offset: 0.0, max }
        }
    }

    impl ScrollSurface for TestSurface {
        fn offset(&self) -> f64 {
            self.offset
        }
        fn set_offset(&mut self, offset: f64) {
            self.offset = offset.clamp(0.0, self.max);
        }
        fn max_offset(&self) -> f64 {
            self.max
        }
    }

    /// Records animate calls; rendering is someone else's problem.
    #[derive(Default)]
    struct RecordingDriver {
        calls: Vec<(usize, VisualState)>,
    }

    impl AnimationDriver for RecordingDriver {
        fn init(&mut self, _total: usize) {}
        fn teardown(&mut self) {
            self.calls.clear();
        }
        fn animate(&mut self, panel: usize, target: VisualState, _now: Instant) {
            self.calls.push((panel, target));
        }
    }

    const COOLDOWN: Duration = Duration::from_millis(1000);

    fn machine(total: usize, top: f64) -> SwipeMachine {
        SwipeMachine::new(total, top, 0.5, COOLDOWN).unwrap()
    }

    /// Scroll the surface to `offset` and feed the event to the machine.
    fn scroll_to(m: &mut SwipeMachine, s: &mut TestSurface, offset: f64, now: Instant) {
        s.set_offset(offset);
        m.on_scroll(s, now);
    }

    #[test]
    fn construction_rejects_bad_geometry() {
        assert!(matches!(
            SwipeMachine::new(4, -1.0, 0.5, COOLDOWN),
            Err(MachineError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            SwipeMachine::new(4, f64::NAN, 0.5, COOLDOWN),
            Err(MachineError::InvalidGeometry { .. })
        ));
        assert_eq!(
            SwipeMachine::new(0, 10.0, 0.5, COOLDOWN).unwrap_err(),
            MachineError::EmptyDeck
        );
    }

    #[test]
    fn crossing_the_boundary_downward_pins_and_freezes() {
        let mut m = machine(4, 12.0);
        let mut s = TestSurface::new(100.0);
        let now = Instant::now();

        scroll_to(&mut m, &mut s, 8.0, now);
        assert!(!m.pinned());

        scroll_to(&mut m, &mut s, 13.0, now);
        assert!(m.pinned());
        assert!(m.enabled());
        // Nudged flush with the section top, and that offset is what the
        // guard will keep restoring.
        assert_eq!(s.offset(), 12.0);
        assert_eq!(m.saved_offset(), Some(12.0));
    }

    #[test]
    fn native_scroll_is_counteracted_while_pinned() {
        let mut m = machine(4, 1200.0);
        let mut s = TestSurface::new(5000.0);
        let now = Instant::now();
        scroll_to(&mut m, &mut s, 1199.0, now);
        scroll_to(&mut m, &mut s, 1203.0, now);
        assert_eq!(m.saved_offset(), Some(1200.0));

        // Wheel momentum keeps moving the page; every event snaps back.
        for drift in [1203.0, 1197.0, 1260.0] {
            scroll_to(&mut m, &mut s, drift, now);
            assert_eq!(s.offset(), 1200.0);
        }
        assert!(m.pinned());
        assert!(m.enabled());
    }

    #[test]
    fn the_pinning_gesture_does_not_also_swipe() {
        let mut m = machine(4, 12.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let now = Instant::now();

        scroll_to(&mut m, &mut s, 13.0, now);
        // Same tick: the gesture that crossed the boundary reaches the
        // observer, which is still inside the enable cooldown.
        m.on_gesture(3.0, &mut s, &mut d, now);
        assert_eq!(m.active(), 0);
        assert!(d.calls.is_empty());

        // After the window the next gesture swipes normally.
        let later = now + COOLDOWN + Duration::from_millis(1);
        m.on_gesture(3.0, &mut s, &mut d, later);
        assert_eq!(m.active(), 1);
        // Every panel got a fresh target.
        assert_eq!(d.calls.len(), 4);
    }

    #[test]
    fn one_swipe_per_cooldown_window() {
        let mut m = machine(6, 5.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let now = Instant::now();
        scroll_to(&mut m, &mut s, 6.0, now);
        assert!(m.pinned());

        let t1 = now + COOLDOWN + Duration::from_millis(1);
        for ms in [0, 50, 300, 900] {
            m.on_gesture(3.0, &mut s, &mut d, t1 + Duration::from_millis(ms));
        }
        assert_eq!(m.active(), 1);
    }

    #[test]
    fn swiping_past_the_last_panel_releases_downward() {
        let mut m = machine(4, 12.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let now = Instant::now();
        scroll_to(&mut m, &mut s, 12.0, now);

        let mut t = now;
        for _ in 0..3 {
            t += COOLDOWN + Duration::from_millis(1);
            m.on_gesture(3.0, &mut s, &mut d, t);
        }
        assert_eq!(m.active(), 3);
        assert!(m.pinned());

        t += COOLDOWN + Duration::from_millis(1);
        m.on_gesture(3.0, &mut s, &mut d, t);
        // Index unchanged, pin released, offset handed back past the
        // boundary, and no saved offset left behind.
        assert_eq!(m.active(), 3);
        assert!(!m.pinned());
        assert!(!m.enabled());
        assert_eq!(m.saved_offset(), None);
        assert_eq!(s.offset(), 13.0);
    }

    #[test]
    fn swiping_above_the_first_panel_releases_upward() {
        let mut m = machine(4, 12.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let now = Instant::now();
        scroll_to(&mut m, &mut s, 12.0, now);

        let t = now + COOLDOWN + Duration::from_millis(1);
        m.on_gesture(-3.0, &mut s, &mut d, t);
        assert_eq!(m.active(), 0);
        assert!(!m.pinned());
        assert_eq!(s.offset(), 11.0);
    }

    #[test]
    fn released_deck_pins_again_on_the_way_back() {
        let mut m = machine(2, 12.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let mut t = Instant::now();
        scroll_to(&mut m, &mut s, 12.0, t);

        // Swipe through and out the bottom.
        for _ in 0..2 {
            t += COOLDOWN + Duration::from_millis(1);
            m.on_gesture(3.0, &mut s, &mut d, t);
        }
        assert!(!m.pinned());
        assert_eq!(s.offset(), 13.0);

        // Scroll on, then come back up: the trailing edge re-pins.
        scroll_to(&mut m, &mut s, 40.0, t);
        scroll_to(&mut m, &mut s, 11.0, t);
        assert!(m.pinned());
        assert_eq!(m.saved_offset(), Some(12.0));
        // Index is wherever the deck was left, still in bounds.
        assert_eq!(m.active(), 1);
    }

    #[test]
    fn saved_offset_tracks_enabled_exactly() {
        let mut m = machine(3, 10.0);
        let mut s = TestSurface::new(100.0);
        let mut d = RecordingDriver::default();
        let now = Instant::now();

        assert_eq!(m.enabled(), m.saved_offset().is_some());
        scroll_to(&mut m, &mut s, 10.0, now);
        assert!(m.enabled() && m.saved_offset().is_some());

        let t = now + COOLDOWN + Duration::from_millis(1);
        m.on_gesture(-3.0, &mut s, &mut d, t);
        assert!(!m.enabled() && m.saved_offset().is_none());
    }
}
