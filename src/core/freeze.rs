//! Scroll ownership — freezing the page while the deck intercepts input.
//!
//! The page's scroll offset is the one shared mutable resource in the whole
//! machine.  Ownership transfers explicitly: while the guard is engaged, every
//! native scroll is counteracted by restoring the saved offset, and nothing
//! else may write it.  Release hands the offset back to native scrolling.

/// Capability over the host's scrollable surface.
///
/// The machine never touches a concrete page type — anything with a clamped,
/// writable offset qualifies (here: the TUI page model; in a browser port it
/// would wrap the document scroll position).
pub trait ScrollSurface {
    /// Current scroll offset, in host units (page rows here).
    fn offset(&self) -> f64;

    /// Move the scroll offset.  Implementations clamp to the valid range.
    fn set_offset(&mut self, offset: f64);

    /// Largest reachable offset (content height minus viewport).
    fn max_offset(&self) -> f64;
}

/// Counteracts native scrolling by restoring a saved offset.
///
/// Engaged and released exactly in step with the intent observer's
/// `enable()`/`disable()` — the saved offset is `Some` iff the deck currently
/// owns the page.
#[derive(Debug, Default)]
pub struct FreezeGuard {
    saved_offset: Option<f64>,
}

impl FreezeGuard {
    /// Capture the surface's current offset and begin counteracting scrolls.
    pub fn engage(&mut self, surface: &impl ScrollSurface) {
        self.saved_offset = Some(surface.offset());
    }

    /// Stop counteracting, without touching the surface.  Idempotent.
    pub fn release(&mut self) {
        self.saved_offset = None;
    }

    pub fn engaged(&self) -> bool {
        self.saved_offset.is_some()
    }

    pub fn saved_offset(&self) -> Option<f64> {
        self.saved_offset
    }

    /// Counteract one native scroll event.  No-op unless engaged.
    pub fn on_scroll(&self, surface: &mut impl ScrollSurface) {
        if let Some(saved) = self.saved_offset {
            surface.set_offset(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSurface {
        offset: f64,
        max: f64,
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

    #[test]
    fn restores_saved_offset_on_every_scroll() {
        let mut surface = TestSurface { offset: 1200.0, max: 5000.0 };
        let mut guard = FreezeGuard::default();
        guard.engage(&surface);
        assert_eq!(guard.saved_offset(), Some(1200.0));

        surface.set_offset(1250.0);
        guard.on_scroll(&mut surface);
        assert_eq!(surface.offset(), 1200.0);

        surface.set_offset(900.0);
        guard.on_scroll(&mut surface);
        assert_eq!(surface.offset(), 1200.0);
    }

    #[test]
    fn released_guard_leaves_the_surface_alone() {
        let mut surface = TestSurface { offset: 1200.0, max: 5000.0 };
        let mut guard = FreezeGuard::default();
        guard.engage(&surface);
        guard.release();
        guard.release(); // double release must be harmless

        surface.set_offset(1250.0);
        guard.on_scroll(&mut surface);
        assert_eq!(surface.offset(), 1250.0);
        assert!(!guard.engaged());
    }
}
