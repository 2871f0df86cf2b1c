//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  The gesture pipeline is also here: one method runs a raw
//! delta through native scroll, the freeze guard, and intent classification
//! in the order the events would fire in a browser host.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::app::content::DeckContent;
use crate::config::AppConfig;
use crate::core::{Bounds, MachineError, PanelHandle, ScrollSurface, SwipeMachine, VisualState};
use crate::ui::animator::TransitionAnimator;
use crate::ui::page::PageModel;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Settings,
}

/// Host-side handle for one rendered card.  The animator writes interpolated
/// visual states through it; the deck widget writes the on-screen rect back
/// after layout so clicks can be hit-tested.
#[derive(Debug, Clone)]
pub struct Card {
    pub visual: VisualState,
    pub area: Option<Rect>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            visual: VisualState::foreground(0),
            area: None,
        }
    }
}

impl PanelHandle for Card {
    fn apply_transform(&mut self, visual: VisualState) {
        self.visual = visual;
    }

    fn bounding_box(&self) -> Option<Bounds> {
        self.area.map(|r| Bounds {
            x: f64::from(r.x),
            y: f64::from(r.y),
            width: f64::from(r.width),
            height: f64::from(r.height),
        })
    }
}

/// Top-level application state.
pub struct AppState {
    /// Deck content (opaque to the machine).
    pub content: DeckContent,
    /// Swipe tuning, persisted across runs.
    pub config: AppConfig,
    /// The scrollable page; the machine's scroll surface.
    pub page: PageModel,
    /// The scroll-intent → panel state machine.
    pub machine: SwipeMachine,
    /// Transition animator (the machine's animation driver).
    pub animator: TransitionAnimator,
    /// Per-panel render handles.
    pub cards: Vec<Card>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        content: DeckContent,
        config: AppConfig,
        page_rows: u16,
    ) -> Result<Self, MachineError> {
        use crate::core::AnimationDriver;

        let total = content.panels.len();
        let page = PageModel::new(page_rows, config.smooth_speed);
        let machine = SwipeMachine::new(
            total,
            page.section_top(),
            config.wheel_tolerance,
            config.cooldown(),
        )?;

        let mut animator = TransitionAnimator::new(config.transition(), config.transition_ease);
        animator.init(total);
        let mut cards = vec![Card::default(); total];
        for (index, card) in cards.iter_mut().enumerate() {
            let visual = machine.visual_state(index);
            animator.snap(index, visual);
            card.visual = visual;
        }

        Ok(Self {
            content,
            config,
            page,
            machine,
            animator,
            cards,
            active_view: ActiveView::default(),
            settings_selected: 0,
            status_message: None,
            should_quit: false,
        })
    }

    /// Run one raw gesture delta through the full pipeline, in browser event
    /// order: native scroll first, then the scroll listener (freeze guard or
    /// pin boundary), then the wheel listener (intent classification).
    pub fn apply_gesture(&mut self, delta: f64, now: Instant) {
        self.page.scroll_by(delta);
        self.machine.on_scroll(&mut self.page, now);
        self.machine
            .on_gesture(delta, &mut self.page, &mut self.animator, now);
    }

    /// Jump the page (Home/End).  A jump across the deck boundary pins just
    /// like any other scroll — the machine sees it as one big native scroll.
    pub fn jump_to(&mut self, offset: f64, now: Instant) {
        self.page.set_offset(offset);
        self.machine.on_scroll(&mut self.page, now);
    }

    /// Advance animations one frame.  Returns `true` while anything moves.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let cards_moving = self.animator.tick(now, &mut self.cards);
        let page_moving = self.page.tick();
        cards_moving || page_moving
    }

    /// Re-derive geometry after a terminal resize and re-seat the cards
    /// (animating across a resize would interpolate against stale rows).
    pub fn resize(&mut self, page_rows: u16) {
        self.page.set_viewport_rows(page_rows);
        let section_top = self.page.section_top();
        self.machine
            .set_section_top(&mut self.page, section_top);
        for (index, card) in self.cards.iter_mut().enumerate() {
            let visual = self.machine.visual_state(index);
            self.animator.snap(index, visual);
            card.visual = visual;
            card.area = None;
        }
    }

    /// Push (possibly adjusted) config values into the live components.
    pub fn apply_tuning(&mut self) {
        self.machine.set_tolerance(self.config.wheel_tolerance);
        self.machine.set_cooldown(self.config.cooldown());
        self.animator.set_duration(self.config.transition());
        self.animator.set_ease(self.config.transition_ease);
        self.page.set_smooth_speed(self.config.smooth_speed);
    }

    /// Topmost card under a screen position, by stacking order.
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                card.bounding_box()
                    .is_some_and(|b| b.contains(f64::from(x), f64::from(y)))
            })
            .max_by_key(|(_, card)| card.visual.z_index)
            .map(|(index, _)| index)
    }

    /// Hint text for the status bar.
    pub fn status_hint(&self) -> String {
        if self.machine.pinned() {
            format!(
                "card {}/{} | wheel/j/k: swipe | ?: tuning | q: quit",
                self.machine.active() + 1,
                self.machine.total(),
            )
        } else {
            "wheel/j/k: scroll | g/G: top/bottom | ?: tuning | q: quit".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(DeckContent::demo(), AppConfig::default(), 20).unwrap()
    }

    #[test]
    fn scrolling_into_the_deck_pins() {
        let mut s = state();
        let now = Instant::now();
        // Two viewport-sized gestures cross the section boundary.
        s.apply_gesture(15.0, now);
        assert!(!s.machine.pinned());
        s.apply_gesture(15.0, now);
        assert!(s.machine.pinned());
        assert_eq!(s.page.offset(), s.page.section_top());
        // The pinning gesture itself did not swipe.
        assert_eq!(s.machine.active(), 0);
    }

    #[test]
    fn swipe_moves_cards_through_the_animator() {
        let mut s = state();
        let now = Instant::now();
        s.apply_gesture(15.0, now);
        s.apply_gesture(15.0, now);

        let later = now + s.config.cooldown() + Duration::from_millis(1);
        s.apply_gesture(3.0, later);
        assert_eq!(s.machine.active(), 1);
        assert!(s.animator.animating());

        // After the transition settles, the handles carry the new policy.
        let done = later + s.config.transition() + Duration::from_millis(1);
        s.on_tick(done);
        assert_eq!(s.cards[1].visual, s.machine.visual_state(1));
        assert!(s.cards[0].visual.opacity < 1.0);
    }

    #[test]
    fn swiping_off_the_end_unpins_and_scrolls_on() {
        let mut s = state();
        let total = s.machine.total();
        let mut t = Instant::now();
        s.apply_gesture(15.0, t);
        s.apply_gesture(15.0, t);

        for _ in 0..total {
            t += s.config.cooldown() + Duration::from_millis(1);
            s.apply_gesture(3.0, t);
        }
        assert!(!s.machine.pinned());
        assert!(s.page.offset() > s.page.section_top());
        assert_eq!(s.machine.active(), total - 1);
    }

    #[test]
    fn resize_keeps_the_pinned_deck_flush() {
        let mut s = state();
        let now = Instant::now();
        s.apply_gesture(15.0, now);
        s.apply_gesture(15.0, now);
        assert!(s.machine.pinned());

        s.resize(30);
        assert!(s.machine.pinned());
        assert_eq!(s.page.offset(), s.page.section_top());
        assert_eq!(s.machine.saved_offset(), Some(s.page.section_top()));
    }
}
