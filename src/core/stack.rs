//! The panel stack — active-index ownership and per-panel presentation.
//!
//! Panel content is opaque to the machine; the stack only knows how many
//! panels exist and which one is active.  Presentation is a pure function of
//! `(index, active)`, recomputed for every panel whenever the index moves.

use std::time::Instant;

use crate::core::error::MachineError;
use crate::core::intent::Intent;

// ───────────────────────────────────────── visual state ──────

/// Derived presentation of one panel.
///
/// Units are host-defined: the terminal renderer reads `translate_y` as rows
/// and `scale` as a width fraction; a browser port would read pixels and CSS
/// transforms.  `rotation` is carried and interpolated even though a cell
/// grid cannot show it — it is part of the contract, not of every renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub scale: f64,
    pub translate_y: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub rotation: f64,
}

impl VisualState {
    /// Neutral, fully foregrounded presentation.
    pub fn foreground(z_index: i32) -> Self {
        Self {
            scale: 1.0,
            translate_y: 0.0,
            opacity: 1.0,
            z_index,
            rotation: 0.0,
        }
    }
}

/// Last rendered bounds of a panel, in host units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

// ───────────────────────────────────────── capabilities ──────

/// Host-side handle to one rendered panel.
///
/// The machine and animator only ever talk to this interface — never to a
/// concrete widget or DOM node.
pub trait PanelHandle {
    /// Imperatively apply a (possibly interpolated) presentation.
    fn apply_transform(&mut self, visual: VisualState);

    /// Bounds from the last layout pass, if the panel has been drawn.
    fn bounding_box(&self) -> Option<Bounds>;
}

/// Renders transitions between visual states.
///
/// Injected into every gesture dispatch rather than referenced as ambient
/// global state, so the core never assumes a specific renderer.
pub trait AnimationDriver {
    /// Allocate per-panel animation state.
    fn init(&mut self, total: usize);

    /// Drop all animation state and stop producing frames.
    fn teardown(&mut self);

    /// Begin moving `panel` toward `target`.
    fn animate(&mut self, panel: usize, target: VisualState, now: Instant);
}

// ───────────────────────────────────────── panel stack ───────

/// Outcome of applying one intent to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The active index moved.
    Moved { from: usize, to: usize },
    /// The intent ran past the deck's end in its travel direction; the index
    /// did not change and the pin controller should release.
    OutOfBounds(Intent),
}

// Presentation defaults.  Receded cards sink behind the stack with a slight
// alternating tilt; upcoming cards wait just below full presentation so they
// read as queued content.  Tunable, not contract — only the stacking order
// `active > upcoming > receded` is guaranteed.
const RECEDED_SCALE: f64 = 0.90;
const RECEDED_TRANSLATE_Y: f64 = 1.5;
const RECEDED_OPACITY: f64 = 0.40;
const RECEDED_TILT_DEG: f64 = 1.5;
const UPCOMING_SCALE: f64 = 0.96;
const UPCOMING_BASE_Y: f64 = 2.0;
const UPCOMING_STEP_Y: f64 = 1.0;
const UPCOMING_DEPTH_CAP: usize = 3;
const UPCOMING_OPACITY: f64 = 0.75;

/// Ordered, fixed-length sequence of panels with one active index.
#[derive(Debug)]
pub struct PanelStack {
    total: usize,
    active: usize,
}

impl PanelStack {
    /// A stack needs at least one panel; fail fast otherwise.
    pub fn new(total: usize) -> Result<Self, MachineError> {
        if total == 0 {
            return Err(MachineError::EmptyDeck);
        }
        Ok(Self { total, active: 0 })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Step the active index, or report out-of-bounds without touching it.
    pub fn apply_intent(&mut self, intent: Intent) -> StepOutcome {
        match intent {
            Intent::Down if self.active + 1 >= self.total => StepOutcome::OutOfBounds(intent),
            Intent::Up if self.active == 0 => StepOutcome::OutOfBounds(intent),
            Intent::Down => {
                let from = self.active;
                self.active += 1;
                StepOutcome::Moved { from, to: self.active }
            }
            Intent::Up => {
                let from = self.active;
                self.active -= 1;
                StepOutcome::Moved { from, to: self.active }
            }
        }
    }

    /// Presentation for `index`, given the current active panel.
    ///
    /// Stacking order: the active panel is always on top, every upcoming
    /// panel above every receded one, and nearer upcoming panels above
    /// farther ones.
    pub fn visual_state(&self, index: usize) -> VisualState {
        let total = self.total as i32;
        if index == self.active {
            return VisualState::foreground(total * 2);
        }

        if index < self.active {
            // Receded: shrunk, shifted, dimmed, stacked bottom-most.
            let tilt = if index % 2 == 0 {
                -RECEDED_TILT_DEG
            } else {
                RECEDED_TILT_DEG
            };
            VisualState {
                scale: RECEDED_SCALE,
                translate_y: RECEDED_TRANSLATE_Y,
                opacity: RECEDED_OPACITY,
                z_index: index as i32,
                rotation: tilt,
            }
        } else {
            // Upcoming: near-full presentation, peeking below the active
            // card, nearer ones stacked higher.
            let depth = index - self.active;
            let peek = UPCOMING_BASE_Y + UPCOMING_STEP_Y * (depth.min(UPCOMING_DEPTH_CAP) - 1) as f64;
            VisualState {
                scale: UPCOMING_SCALE,
                translate_y: peek,
                opacity: UPCOMING_OPACITY,
                z_index: total * 2 - depth as i32,
                rotation: 0.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_empty_deck() {
        assert_eq!(PanelStack::new(0).unwrap_err(), MachineError::EmptyDeck);
    }

    #[test]
    fn down_past_the_last_panel_is_out_of_bounds() {
        let mut stack = PanelStack::new(4).unwrap();
        for _ in 0..3 {
            stack.apply_intent(Intent::Down);
        }
        assert_eq!(stack.active(), 3);
        assert_eq!(
            stack.apply_intent(Intent::Down),
            StepOutcome::OutOfBounds(Intent::Down)
        );
        assert_eq!(stack.active(), 3);
    }

    #[test]
    fn up_past_the_first_panel_is_out_of_bounds() {
        let mut stack = PanelStack::new(4).unwrap();
        assert_eq!(
            stack.apply_intent(Intent::Up),
            StepOutcome::OutOfBounds(Intent::Up)
        );
        assert_eq!(stack.active(), 0);
    }

    #[test]
    fn mid_range_step_moves_and_restyles() {
        let mut stack = PanelStack::new(6).unwrap();
        stack.apply_intent(Intent::Down);
        stack.apply_intent(Intent::Down);
        assert_eq!(stack.active(), 2);

        assert_eq!(
            stack.apply_intent(Intent::Down),
            StepOutcome::Moved { from: 2, to: 3 }
        );
        let fore = stack.visual_state(3);
        assert_eq!(fore.scale, 1.0);
        assert_eq!(fore.opacity, 1.0);
        assert_eq!(fore.translate_y, 0.0);
        let receded = stack.visual_state(2);
        assert!(receded.scale < 1.0);
        assert!(receded.opacity < 1.0);
        assert!(receded.z_index < fore.z_index);
    }

    #[test]
    fn active_index_never_escapes_bounds() {
        for total in [1, 2, 5] {
            let mut stack = PanelStack::new(total).unwrap();
            let pattern = [
                Intent::Down,
                Intent::Down,
                Intent::Up,
                Intent::Down,
                Intent::Up,
                Intent::Up,
                Intent::Up,
                Intent::Down,
            ];
            for intent in pattern.iter().cycle().take(50).copied() {
                stack.apply_intent(intent);
                assert!(stack.active() < total);
            }
        }
    }

    #[test]
    fn stacking_order_holds_for_every_position() {
        let mut stack = PanelStack::new(5).unwrap();
        for _ in 0..5 {
            let active = stack.active();
            let active_z = stack.visual_state(active).z_index;
            for index in 0..5 {
                if index == active {
                    continue;
                }
                let z = stack.visual_state(index).z_index;
                assert!(z < active_z, "panel {index} above active {active}");
                if index < active {
                    // Every receded panel sits below every upcoming one.
                    for upcoming in (active + 1)..5 {
                        assert!(z < stack.visual_state(upcoming).z_index);
                    }
                }
            }
            stack.apply_intent(Intent::Down);
        }
    }
}
