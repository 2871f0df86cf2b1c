//! Pin lifecycle — whether the deck section currently owns the viewport.
//!
//! Two states, re-enterable in both directions: scrolling down pins when the
//! section's leading edge reaches the viewport top, scrolling back up pins
//! again when its trailing edge reaches the viewport bottom.  The side
//! effects of each transition (offset nudge, observer enable/disable) are
//! orchestrated by the machine; this type only answers "did the state
//! actually change".

/// Pin state of the deck section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinState {
    #[default]
    Unpinned,
    Pinned,
}

#[derive(Debug, Default)]
pub struct PinController {
    state: PinState,
}

impl PinController {
    pub fn pinned(&self) -> bool {
        self.state == PinState::Pinned
    }

    /// Leading edge reached the viewport top while scrolling down.
    ///
    /// Returns `true` only when the state actually flipped — re-entrant calls
    /// while already pinned are no-ops, so the observer is never enabled (and
    /// no listener registered) twice.
    pub fn on_enter(&mut self) -> bool {
        self.pin("enter")
    }

    /// Trailing edge reached the viewport bottom while scrolling up.
    pub fn on_enter_back(&mut self) -> bool {
        self.pin("enter-back")
    }

    /// The stack ran out of panels in the travel direction — hand the
    /// viewport back to native scrolling.  Returns `false` if not pinned.
    pub fn release(&mut self) -> bool {
        if self.state == PinState::Unpinned {
            return false;
        }
        self.state = PinState::Unpinned;
        tracing::debug!("section unpinned");
        true
    }

    fn pin(&mut self, edge: &str) -> bool {
        if self.state == PinState::Pinned {
            return false;
        }
        self.state = PinState::Pinned;
        tracing::debug!(edge, "section pinned");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_pins_once() {
        let mut pin = PinController::default();
        assert!(pin.on_enter());
        assert!(pin.pinned());
        // Re-entrant boundary events while pinned must not report a change.
        assert!(!pin.on_enter());
        assert!(!pin.on_enter_back());
    }

    #[test]
    fn full_cycle_is_re_enterable() {
        let mut pin = PinController::default();
        assert!(pin.on_enter());
        assert!(pin.release());
        assert!(!pin.release());
        assert!(!pin.pinned());
        // Coming back from below pins again.
        assert!(pin.on_enter_back());
        assert!(pin.pinned());
    }
}
